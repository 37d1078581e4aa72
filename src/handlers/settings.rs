// src/handlers/settings.rs

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
        rbac::{CanPlans, CanSettings, CurrentAccess, RequireCapability},
    },
    models::settings::{Plan, SystemConfig, UpdatePlanPayload, UpdateSettingsRequest},
};

// GET /api/settings
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Configurações",
    responses((status = 200, description = "Configuração do painel", body = SystemConfig)),
    security(("api_jwt" = []))
)]
pub async fn get_settings(
    State(app_state): State<AppState>,
    locale: Locale,
    _access: CurrentAccess,
) -> Result<impl IntoResponse, ApiError> {
    let settings = app_state
        .settings_service
        .get_config()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(settings)))
}

// PUT /api/settings
#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "Configurações",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Configuração atualizada", body = SystemConfig),
        (status = 403, description = "Sem a capacidade 'settings' (revenda master nunca tem)")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireCapability<CanSettings>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let updated = app_state
        .settings_service
        .update_config(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(updated)))
}

// GET /api/plans
#[utoipa::path(
    get,
    path = "/api/plans",
    tag = "Planos",
    responses((status = 200, description = "Catálogo de planos", body = Vec<Plan>)),
    security(("api_jwt" = []))
)]
pub async fn list_plans(
    State(app_state): State<AppState>,
    locale: Locale,
    _access: CurrentAccess,
) -> Result<impl IntoResponse, ApiError> {
    let plans = app_state
        .settings_service
        .list_plans()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(plans)))
}

// PUT /api/plans/{id}
#[utoipa::path(
    put,
    path = "/api/plans/{id}",
    tag = "Planos",
    params(("id" = String, Path, description = "ID do plano")),
    request_body = UpdatePlanPayload,
    responses(
        (status = 200, description = "Plano atualizado", body = Plan),
        (status = 404, description = "Plano não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_plan(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireCapability<CanPlans>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePlanPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let plan = app_state
        .settings_service
        .update_plan(&id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(plan)))
}
