// src/handlers/payments.rs

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
        rbac::{CanPayments, RequireCapability},
    },
    models::payment::{Payment, RecordPaymentPayload, ReminderLink, ReminderPayload},
};

// GET /api/payments
#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "Pagamentos",
    responses(
        (status = 200, description = "Histórico de pagamentos visível", body = Vec<Payment>),
        (status = 403, description = "Sem a capacidade 'payments'")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_payments(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireCapability(ctx, _): RequireCapability<CanPayments>,
) -> Result<impl IntoResponse, ApiError> {
    let payments = app_state
        .payment_service
        .list(&ctx)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(payments)))
}

// POST /api/customers/{id}/payments
#[utoipa::path(
    post,
    path = "/api/customers/{id}/payments",
    tag = "Pagamentos",
    params(("id" = String, Path, description = "ID do cliente")),
    request_body = RecordPaymentPayload,
    responses(
        (status = 201, description = "Pagamento registrado", body = Payment),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn record_payment(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireCapability(ctx, _): RequireCapability<CanPayments>,
    Path(customer_id): Path<String>,
    Json(payload): Json<RecordPaymentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let payment = app_state
        .payment_service
        .record(&ctx, &customer_id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(payment)))
}

// POST /api/customers/{id}/reminder
#[utoipa::path(
    post,
    path = "/api/customers/{id}/reminder",
    tag = "Pagamentos",
    params(("id" = String, Path, description = "ID do cliente")),
    request_body = ReminderPayload,
    responses(
        (status = 200, description = "Link wa.me pronto para envio", body = ReminderLink),
        (status = 400, description = "Número de WhatsApp inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn build_reminder(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireCapability(ctx, _): RequireCapability<CanPayments>,
    Path(customer_id): Path<String>,
    Json(payload): Json<ReminderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let link = app_state
        .reminder_service
        .reminder_for(&ctx, &customer_id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(link)))
}
