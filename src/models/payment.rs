// src/models/payment.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Late,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,

    #[schema(value_type = f64, example = 29.9)]
    pub amount: Decimal,

    pub date: NaiveDate,
    pub status: PaymentStatus,

    #[schema(example = "PIX")]
    pub method: String,

    pub owner_id: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentPayload {
    #[schema(value_type = f64, example = 29.9)]
    pub amount: Decimal,

    // Sem valor = hoje
    pub date: Option<NaiveDate>,

    pub status: Option<PaymentStatus>,

    #[validate(length(min = 1, message = "Informe a forma de pagamento."))]
    #[schema(example = "PIX")]
    pub method: String,
}

// Lembrete de vencimento via WhatsApp (só o link; o envio é do usuário)
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPayload {
    // Substitui o número cadastrado do cliente
    #[schema(example = "11999999999")]
    pub phone_override: Option<String>,

    // Placeholders: {nome}, {dias}, {data}, {valor}
    pub template: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderLink {
    pub customer_id: String,
    pub phone: String,
    pub message: String,
    #[schema(example = "https://wa.me/5511999999999?text=Ol%C3%A1")]
    pub url: String,
}
