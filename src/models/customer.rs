// src/models/customer.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// O status é sempre editado pelo operador; o motor nunca muda sozinho.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    Active,
    Inactive,
    Suspended,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,

    #[schema(example = "João Silva")]
    pub name: String,

    #[schema(example = "(11) 99999-9999")]
    pub whatsapp: String,

    #[schema(example = "Premium")]
    pub plan: String,

    pub status: CustomerStatus,

    #[schema(value_type = f64, example = 49.9)]
    pub monthly_fee: Decimal,

    #[serde(with = "crate::common::dates::flexible")]
    pub expiration_date: DateTime<Utc>,

    #[serde(default)]
    pub last_payment_date: Option<NaiveDate>,

    #[serde(default)]
    pub notes: String,

    pub created_at: NaiveDate,

    // Revenda (ou admin) que cadastrou
    pub owner_id: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Maria Santos")]
    pub name: String,

    #[validate(length(min = 8, message = "Informe um WhatsApp válido."))]
    #[schema(example = "(11) 88888-8888")]
    pub whatsapp: String,

    #[validate(length(min = 1, message = "O plano é obrigatório."))]
    #[schema(example = "Básico")]
    pub plan: String,

    pub status: Option<CustomerStatus>,

    #[schema(value_type = f64, example = 29.9)]
    pub monthly_fee: Decimal,

    #[schema(example = "2024-02-10")]
    pub expiration_date: String,

    pub last_payment_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,

    #[validate(length(min = 8, message = "Informe um WhatsApp válido."))]
    pub whatsapp: Option<String>,

    #[validate(length(min = 1, message = "O plano é obrigatório."))]
    pub plan: Option<String>,

    pub status: Option<CustomerStatus>,

    #[schema(value_type = Option<f64>)]
    pub monthly_fee: Option<Decimal>,

    pub expiration_date: Option<String>,
    pub last_payment_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

// Filtros da listagem: ?search=joao&status=active
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFilter {
    pub search: Option<String>,
    pub status: Option<CustomerStatus>,
}
