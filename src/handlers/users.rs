// src/handlers/users.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{CanUsers, RequireCapability},
    },
    models::auth::{ManageUserPayload, UserResponse},
};

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Usuários",
    responses(
        (status = 200, description = "Contas administrativas", body = Vec<UserResponse>),
        (status = 403, description = "Sem a capacidade 'users'")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireCapability<CanUsers>,
) -> Result<impl IntoResponse, ApiError> {
    let users = app_state
        .user_service
        .list()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let body: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok((StatusCode::OK, Json(body)))
}

// POST /api/users/{id}/actions
#[utoipa::path(
    post,
    path = "/api/users/{id}/actions",
    tag = "Usuários",
    params(("id" = String, Path, description = "ID do usuário")),
    request_body = ManageUserPayload,
    responses(
        (status = 200, description = "activate | deactivate | promote | demote", body = UserResponse),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn manage_user(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireCapability<CanUsers>,
    Path(id): Path<String>,
    Json(payload): Json<ManageUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let user = app_state
        .user_service
        .manage(&id, payload.action)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(UserResponse::from(user))))
}
