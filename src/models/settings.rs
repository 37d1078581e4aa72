// src/models/settings.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemConfig {
    #[schema(example = "https://painel.com/assets/logo.png")]
    pub logo_url: String,

    #[schema(example = "IPTV Manager Pro")]
    pub system_name: String,

    #[schema(example = "#7c3aed")]
    pub primary_color: String,

    #[schema(example = "#a855f7")]
    pub secondary_color: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            logo_url: String::new(),
            system_name: "IPTV Manager Pro".to_string(),
            primary_color: "#7c3aed".to_string(),
            secondary_color: "#a855f7".to_string(),
        }
    }
}

// Só os campos enviados são alterados
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub logo_url: Option<String>,

    #[validate(length(min = 1, message = "O nome do sistema é obrigatório."))]
    pub system_name: Option<String>,

    #[validate(length(equal = 7, message = "Use uma cor no formato #rrggbb."))]
    pub primary_color: Option<String>,

    #[validate(length(equal = 7, message = "Use uma cor no formato #rrggbb."))]
    pub secondary_color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,

    #[schema(example = "Premium")]
    pub name: String,

    #[schema(value_type = f64, example = 49.9)]
    pub price: Decimal,

    #[schema(example = "200+ canais + filmes")]
    pub channels: String,

    pub description: String,
    pub active: bool,
}

impl Plan {
    /// Catálogo inicial gravado quando `db_planos` está vazio.
    pub fn initial_catalog() -> Vec<Plan> {
        let cents = |value: i64| Decimal::new(value, 2);
        let plan = |id: &str, name: &str, price: Decimal, channels: &str, description: &str| Plan {
            id: id.to_string(),
            name: name.to_string(),
            price,
            channels: channels.to_string(),
            description: description.to_string(),
            active: true,
        };

        vec![
            plan("1", "Básico", cents(2990), "100+ canais", "Plano básico com canais essenciais"),
            plan("2", "Premium", cents(4990), "200+ canais + filmes", "Plano premium com filmes inclusos"),
            plan("3", "Ultra", cents(7990), "300+ canais + filmes + séries", "Plano completo com séries"),
            plan("4", "Família", cents(9990), "400+ canais + múltiplas telas", "Plano familiar com múltiplas telas"),
        ]
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanPayload {
    #[validate(length(min = 1, message = "O nome do plano é obrigatório."))]
    pub name: Option<String>,

    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,

    pub channels: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}
