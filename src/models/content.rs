// src/models/content.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Movie,
    Series,
}

// Uma entrada do acervo estático
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub key: &'static str,
    pub title: &'static str,
    pub synopsis: &'static str,
    pub image_url: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentResult {
    pub kind: ContentKind,
    #[schema(example = "matrix")]
    pub key: String,
    #[schema(example = "Matrix")]
    pub title: String,
    pub synopsis: String,
    pub image_url: String,
}

impl ContentResult {
    pub fn from_entry(kind: ContentKind, entry: &CatalogEntry) -> Self {
        Self {
            kind,
            key: entry.key.to_string(),
            title: entry.title.to_string(),
            synopsis: entry.synopsis.to_string(),
            image_url: entry.image_url.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FootballMatch {
    pub id: String,
    #[schema(example = "Flamengo")]
    pub home: String,
    #[schema(example = "Palmeiras")]
    pub away: String,
    pub date: NaiveDate,
    #[schema(example = "16:00")]
    pub kickoff: String,
    #[schema(example = "Campeonato Brasileiro")]
    pub championship: String,
    pub stadium: String,
    pub status: MatchStatus,
    pub banner_image_url: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LookupQuery {
    pub title: String,
    pub kind: ContentKind,
}
