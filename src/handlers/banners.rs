// src/handlers/banners.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{CanBanners, RequireCapability},
    },
    models::banner::{Banner, CreateBannerPayload},
};

// GET /api/banners
#[utoipa::path(
    get,
    path = "/api/banners",
    tag = "Banners",
    responses((status = 200, description = "Banners visíveis", body = Vec<Banner>)),
    security(("api_jwt" = []))
)]
pub async fn list_banners(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireCapability(ctx, _): RequireCapability<CanBanners>,
) -> Result<impl IntoResponse, ApiError> {
    let banners = app_state
        .banner_service
        .list(&ctx)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(banners)))
}

// POST /api/banners
#[utoipa::path(
    post,
    path = "/api/banners",
    tag = "Banners",
    request_body = CreateBannerPayload,
    responses(
        (status = 201, description = "Banner criado com as logos atuais", body = Banner),
        (status = 403, description = "Sem a capacidade 'banners'")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_banner(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireCapability(ctx, _): RequireCapability<CanBanners>,
    Json(payload): Json<CreateBannerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let banner = app_state
        .banner_service
        .create(&ctx, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(banner)))
}

// DELETE /api/banners/{id}
#[utoipa::path(
    delete,
    path = "/api/banners/{id}",
    tag = "Banners",
    params(("id" = String, Path, description = "ID do banner")),
    responses(
        (status = 204, description = "Banner removido"),
        (status = 404, description = "Banner não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_banner(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireCapability(ctx, _): RequireCapability<CanBanners>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .banner_service
        .delete(&ctx, &id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
