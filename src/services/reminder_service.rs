// src/services/reminder_service.rs
//
// Lembretes de vencimento via WhatsApp. Só montamos o link wa.me; quem
// envia a mensagem é o operador.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::{
    common::{clock::Clock, dates::format_br, error::AppError},
    db::CustomerRepository,
    models::{
        customer::Customer,
        payment::{ReminderLink, ReminderPayload},
    },
    services::{lifecycle::days_remaining, permissions::AccessContext},
};

pub const DEFAULT_TEMPLATE: &str =
    "Olá {nome}! Seu plano IPTV vence em {dias} dia(s) ({data}). Valor: R$ {valor}. Renove para manter o acesso!";

const WHATSAPP_BASE_URL: &str = "https://wa.me/55";

pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

// Mesmo conjunto que o encodeURIComponent do navegador deixa passar
const URI_COMPONENT_UNRESERVED: [(&str, &str); 5] =
    [("%21", "!"), ("%27", "'"), ("%28", "("), ("%29", ")"), ("%2A", "*")];

pub fn encode_uri_component(text: &str) -> String {
    URI_COMPONENT_UNRESERVED
        .iter()
        .fold(urlencoding::encode(text).into_owned(), |acc, (escaped, raw)| {
            acc.replace(escaped, raw)
        })
}

/// Preenche o modelo. Cada placeholder é trocado só na primeira ocorrência.
pub fn render_message(template: &str, customer: &Customer, now: DateTime<Utc>) -> String {
    let days = days_remaining(now, customer.expiration_date);
    let value = format!("{:.2}", customer.monthly_fee.round_dp(2));

    template
        .replacen("{nome}", &customer.name, 1)
        .replacen("{dias}", &days.to_string(), 1)
        .replacen("{data}", &format_br(&customer.expiration_date), 1)
        .replacen("{valor}", &value, 1)
}

pub fn build_link(
    customer: &Customer,
    payload: &ReminderPayload,
    now: DateTime<Utc>,
) -> Result<ReminderLink, AppError> {
    let phone = digits_only(payload.phone_override.as_deref().unwrap_or(&customer.whatsapp));
    if phone.is_empty() {
        return Err(AppError::InvalidPhoneNumber);
    }

    let template = payload
        .template
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_TEMPLATE);
    let message = render_message(template, customer, now);
    let url = format!("{WHATSAPP_BASE_URL}{phone}?text={}", encode_uri_component(&message));

    Ok(ReminderLink {
        customer_id: customer.id.clone(),
        phone,
        message,
        url,
    })
}

#[derive(Clone)]
pub struct ReminderService {
    customer_repo: CustomerRepository,
    clock: Arc<dyn Clock>,
}

impl ReminderService {
    pub fn new(customer_repo: CustomerRepository, clock: Arc<dyn Clock>) -> Self {
        Self { customer_repo, clock }
    }

    pub async fn reminder_for(
        &self,
        ctx: &AccessContext,
        customer_id: &str,
        payload: &ReminderPayload,
    ) -> Result<ReminderLink, AppError> {
        let customer = self
            .customer_repo
            .find_by_id(customer_id)
            .await?
            .filter(|c| ctx.can_see(&c.owner_id))
            .ok_or(AppError::CustomerNotFound)?;

        build_link(&customer, payload, self.clock.now())
    }
}
