// src/handlers/content.rs
//
// Consultas ao acervo e à agenda de jogos; usadas ao montar banners.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{CanBanners, RequireCapability},
    },
    models::content::{ContentResult, FootballMatch, LookupQuery, SearchQuery},
    services::catalog_service,
};

// GET /api/content/search?q=
#[utoipa::path(
    get,
    path = "/api/content/search",
    tag = "Conteúdo",
    params(("q" = Option<String>, Query, description = "Mínimo de 2 caracteres")),
    responses((status = 200, description = "Até 8 filmes/séries", body = Vec<ContentResult>)),
    security(("api_jwt" = []))
)]
pub async fn search_content(
    _guard: RequireCapability<CanBanners>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let results = catalog_service::search(query.q.as_deref().unwrap_or_default());
    (StatusCode::OK, Json(results))
}

// GET /api/content/lookup?title=&kind=
#[utoipa::path(
    get,
    path = "/api/content/lookup",
    tag = "Conteúdo",
    params(
        ("title" = String, Query, description = "Título digitado"),
        ("kind" = String, Query, description = "movie | series")
    ),
    responses(
        (status = 200, description = "Título, sinopse e imagem", body = ContentResult),
        (status = 404, description = "Nada encontrado no acervo")
    ),
    security(("api_jwt" = []))
)]
pub async fn lookup_content(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireCapability<CanBanners>,
    Query(query): Query<LookupQuery>,
) -> Result<impl IntoResponse, ApiError> {
    match catalog_service::lookup(&query.title, query.kind) {
        Some(found) => Ok((StatusCode::OK, Json(found))),
        None => Err(ApiError {
            status: StatusCode::NOT_FOUND,
            error: app_state.i18n_store.translate(&locale.0, "content_not_found"),
            details: None,
        }),
    }
}

// GET /api/content/matches?q=
#[utoipa::path(
    get,
    path = "/api/content/matches",
    tag = "Conteúdo",
    params(("q" = Option<String>, Query, description = "Time ou campeonato")),
    responses((status = 200, description = "Jogos de hoje e amanhã", body = Vec<FootballMatch>)),
    security(("api_jwt" = []))
)]
pub async fn list_matches(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanBanners>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let matches = catalog_service::matches(app_state.clock.now(), query.q.as_deref());
    (StatusCode::OK, Json(matches))
}
