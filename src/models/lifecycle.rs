// src/models/lifecycle.rs

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Warning,
    Blocked,
}

/// Alerta derivado de vencimento. Nunca é persistido.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub kind: AlertKind,
    pub reseller_id: String,
    pub reseller_name: String,
    pub days_remaining: i64,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ResellerState {
    Active,
    ActiveButWarned,
    Blocked,
}

/// Transição de bloqueio calculada pelo motor; quem chama persiste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTransition {
    pub reseller_id: String,
    // false quando a revenda já estava bloqueada e inativa
    pub newly_blocked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpirationReport {
    pub alerts: Vec<Alert>,
    pub blocks: Vec<BlockTransition>,
}
