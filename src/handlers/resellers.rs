// src/handlers/resellers.rs

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
        rbac::{CanResellers, CurrentAccess, RequireCapability},
    },
    models::reseller::{
        CreateResellerPayload, ManageResellerPayload, ResellerResponse, UpdateLogoPayload,
        UpdateResellerPayload,
    },
};

// GET /api/resellers
#[utoipa::path(
    get,
    path = "/api/resellers",
    tag = "Revendas",
    responses(
        (status = 200, description = "Todas as revendas", body = Vec<ResellerResponse>),
        (status = 403, description = "Sem a capacidade 'resellers'")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_resellers(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireCapability<CanResellers>,
) -> Result<impl IntoResponse, ApiError> {
    let resellers = app_state
        .reseller_service
        .list()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let body: Vec<ResellerResponse> = resellers.into_iter().map(ResellerResponse::from).collect();
    Ok((StatusCode::OK, Json(body)))
}

// POST /api/resellers
#[utoipa::path(
    post,
    path = "/api/resellers",
    tag = "Revendas",
    request_body = CreateResellerPayload,
    responses(
        (status = 201, description = "Revenda criada", body = ResellerResponse),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_reseller(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireCapability<CanResellers>,
    Json(payload): Json<CreateResellerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let reseller = app_state
        .reseller_service
        .create(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(ResellerResponse::from(reseller))))
}

// PUT /api/resellers/{id}
#[utoipa::path(
    put,
    path = "/api/resellers/{id}",
    tag = "Revendas",
    params(("id" = String, Path, description = "ID da revenda")),
    request_body = UpdateResellerPayload,
    responses(
        (status = 200, description = "Revenda atualizada", body = ResellerResponse),
        (status = 404, description = "Revenda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_reseller(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireCapability<CanResellers>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateResellerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let reseller = app_state
        .reseller_service
        .update(&id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(ResellerResponse::from(reseller))))
}

// DELETE /api/resellers/{id}
#[utoipa::path(
    delete,
    path = "/api/resellers/{id}",
    tag = "Revendas",
    params(("id" = String, Path, description = "ID da revenda")),
    responses(
        (status = 204, description = "Revenda removida e sessões encerradas"),
        (status = 404, description = "Revenda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_reseller(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireCapability<CanResellers>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .reseller_service
        .delete(&id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// POST /api/resellers/{id}/actions
#[utoipa::path(
    post,
    path = "/api/resellers/{id}/actions",
    tag = "Revendas",
    params(("id" = String, Path, description = "ID da revenda")),
    request_body = ManageResellerPayload,
    responses(
        (status = 200, description = "Ação aplicada (block | unblock | renew)", body = ResellerResponse),
        (status = 404, description = "Revenda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn manage_reseller(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireCapability<CanResellers>,
    Path(id): Path<String>,
    Json(payload): Json<ManageResellerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let reseller = app_state
        .reseller_service
        .manage(&id, payload.action)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(ResellerResponse::from(reseller))))
}

// PUT /api/profile/logo
#[utoipa::path(
    put,
    path = "/api/profile/logo",
    tag = "Revendas",
    request_body = UpdateLogoPayload,
    responses(
        (status = 200, description = "Logo da revenda logada atualizada", body = ResellerResponse),
        (status = 404, description = "O principal não é uma revenda")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_own_logo(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentAccess(ctx): CurrentAccess,
    Json(payload): Json<UpdateLogoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let reseller = app_state
        .reseller_service
        .update_own_logo(&ctx, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(ResellerResponse::from(reseller))))
}
