// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedPrincipal, i18n::Locale, rbac::CurrentAccess},
    models::auth::{AuthResponse, ChangeCredentialsPayload, LoginPayload, MeResponse},
};

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login realizado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas ou revenda bloqueada")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let auth = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(auth)))
}

// POST /api/auth/logout
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses((status = 204, description = "Sessão encerrada")),
    security(("api_jwt" = []))
)]
pub async fn logout(
    State(app_state): State<AppState>,
    locale: Locale,
    auth: AuthenticatedPrincipal,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .auth_service
        .logout(&auth.session_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses((status = 200, description = "Principal logado e suas capacidades", body = MeResponse)),
    security(("api_jwt" = []))
)]
pub async fn get_me(CurrentAccess(ctx): CurrentAccess) -> Json<MeResponse> {
    Json(MeResponse {
        admin_standing: ctx.has_admin_standing(),
        capabilities: ctx.capabilities(),
        principal: ctx.principal,
    })
}

// PUT /api/auth/credentials
#[utoipa::path(
    put,
    path = "/api/auth/credentials",
    tag = "Auth",
    request_body = ChangeCredentialsPayload,
    responses(
        (status = 200, description = "Credenciais alteradas; novo token", body = AuthResponse),
        (status = 409, description = "E-mail já usado por outra conta")
    ),
    security(("api_jwt" = []))
)]
pub async fn change_credentials(
    State(app_state): State<AppState>,
    locale: Locale,
    auth: AuthenticatedPrincipal,
    Json(payload): Json<ChangeCredentialsPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let renewed = app_state
        .auth_service
        .change_credentials(&auth.principal, &payload.new_email, &payload.new_password)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(renewed)))
}
