// src/models/banner.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogoPosition {
    #[default]
    Right,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BannerCategory {
    Movie,
    Series,
    Sport,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: String,
    pub category: BannerCategory,
    pub image_url: String,

    // Logo do sistema no momento da criação
    pub logo_url: String,

    pub owner_id: String,

    #[serde(with = "crate::common::dates::flexible")]
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,

    // Copiados da revenda que criou
    #[serde(default)]
    pub custom_logo_url: Option<String>,
    #[serde(default)]
    pub logo_position: LogoPosition,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBannerPayload {
    pub category: BannerCategory,

    #[validate(length(min = 1, message = "Informe a imagem do banner."))]
    #[schema(example = "https://images.unsplash.com/photo-1489599511986-c6b3c9c5b1c8")]
    pub image_url: String,

    #[schema(example = "Casablanca")]
    pub title: Option<String>,
    pub synopsis: Option<String>,

    #[schema(example = "2024-01-10 16:00")]
    pub event_date: Option<String>,
}
