// src/models/reseller.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::banner::LogoPosition;
use crate::models::rbac::Permissions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResellerTier {
    Master,
    Simple,
}

// Como a revenda fica gravada em `db_revendas`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reseller {
    pub id: String,
    pub name: String,
    pub email: String,
    // Texto puro: endurecer autenticação está fora do escopo
    pub password: String,
    pub active: bool,
    #[serde(default)]
    pub blocked: bool,
    pub tier: ResellerTier,
    pub monthly_fee: Decimal,

    #[serde(with = "crate::common::dates::flexible")]
    pub expiration_date: DateTime<Utc>,

    #[serde(with = "crate::common::dates::flexible")]
    pub created_at: DateTime<Utc>,

    #[serde(default, with = "crate::common::dates::flexible_opt")]
    pub last_access: Option<DateTime<Utc>>,

    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub custom_logo_url: Option<String>,
    #[serde(default)]
    pub logo_position: LogoPosition,

    // Antecedência do alerta em dias; sem valor usa o padrão (5)
    #[serde(default)]
    pub alert_lead_days: Option<u32>,

    #[serde(default)]
    pub permissions: Permissions,
}

impl Reseller {
    /// Revenda bloqueada nunca autentica, mesmo que `active` tenha ficado true.
    pub fn can_authenticate(&self) -> bool {
        self.active && !self.blocked
    }

    pub fn block(&mut self) {
        self.blocked = true;
        self.active = false;
    }

    pub fn unblock(&mut self) {
        self.blocked = false;
        self.active = true;
    }
}

/// Atualização parcial por id: só os campos presentes são gravados.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResellerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "crate::common::dates::flexible_opt"
    )]
    pub expiration_date: Option<DateTime<Utc>>,
}

impl ResellerPatch {
    pub fn blocked() -> Self {
        Self {
            blocked: Some(true),
            active: Some(false),
            ..Self::default()
        }
    }

    pub fn unblocked() -> Self {
        Self {
            blocked: Some(false),
            active: Some(true),
            ..Self::default()
        }
    }

    pub fn renewed(expiration_date: DateTime<Utc>) -> Self {
        Self {
            expiration_date: Some(expiration_date),
            ..Self::default()
        }
    }
}

// O que sai para o frontend (sem a senha)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResellerResponse {
    pub id: String,
    #[schema(example = "Revenda Centro")]
    pub name: String,
    #[schema(example = "centro@revenda.com")]
    pub email: String,
    pub active: bool,
    pub blocked: bool,
    pub tier: ResellerTier,
    #[schema(value_type = f64, example = 50.0)]
    pub monthly_fee: Decimal,
    pub expiration_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub last_access: Option<DateTime<Utc>>,
    pub notes: String,
    pub custom_logo_url: Option<String>,
    pub logo_position: LogoPosition,
    pub alert_lead_days: Option<u32>,
    pub permissions: Permissions,
}

impl From<Reseller> for ResellerResponse {
    fn from(r: Reseller) -> Self {
        Self {
            id: r.id,
            name: r.name,
            email: r.email,
            active: r.active,
            blocked: r.blocked,
            tier: r.tier,
            monthly_fee: r.monthly_fee,
            expiration_date: r.expiration_date,
            created_at: r.created_at,
            last_access: r.last_access,
            notes: r.notes,
            custom_logo_url: r.custom_logo_url,
            logo_position: r.logo_position,
            alert_lead_days: r.alert_lead_days,
            permissions: r.permissions,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateResellerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Revenda Centro")]
    pub name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub password: String,

    #[schema(value_type = Option<f64>, example = 50.0)]
    pub monthly_fee: Option<Decimal>,

    // "AAAA-MM-DD" ou RFC 3339; sem valor = hoje + 30 dias
    #[schema(example = "2024-02-15")]
    pub expiration_date: Option<String>,

    pub tier: Option<ResellerTier>,
    pub permissions: Option<Permissions>,

    #[validate(range(min = 0, max = 365, message = "Use entre 0 e 365 dias."))]
    pub alert_lead_days: Option<u32>,

    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResellerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub password: Option<String>,

    #[schema(value_type = Option<f64>)]
    pub monthly_fee: Option<Decimal>,
    pub expiration_date: Option<String>,
    pub tier: Option<ResellerTier>,
    pub permissions: Option<Permissions>,

    #[validate(range(min = 0, max = 365, message = "Use entre 0 e 365 dias."))]
    pub alert_lead_days: Option<u32>,

    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResellerAction {
    Block,
    Unblock,
    Renew,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManageResellerPayload {
    pub action: ResellerAction,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLogoPayload {
    #[validate(length(min = 1, message = "Informe a URL da logo."))]
    pub logo_url: String,
    #[serde(default)]
    pub position: LogoPosition,
}
