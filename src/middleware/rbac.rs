// src/middleware/rbac.rs

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use std::marker::PhantomData;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedPrincipal, i18n::Locale},
    models::rbac::Capability,
    services::permissions::AccessContext,
};

/// O que é uma capacidade exigida por rota
pub trait CapabilityDef: Send + Sync + 'static {
    fn capability() -> Capability;
}

// Monta o contexto de acesso com o roster de revendas lido agora
async fn access_context(parts: &mut Parts, app_state: &AppState) -> Result<AccessContext, ApiError> {
    let locale = Locale::from_request_parts(parts, app_state).await.unwrap_or_default();
    let AuthenticatedPrincipal { principal, .. } =
        AuthenticatedPrincipal::from_request_parts(parts, app_state).await?;

    let resellers = app_state
        .reseller_repo
        .list_all()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(AccessContext::new(principal, resellers))
}

/// Qualquer principal autenticado (rotas abertas a todos os perfis).
pub struct CurrentAccess(pub AccessContext);

impl<S> FromRequestParts<S> for CurrentAccess
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        Ok(CurrentAccess(access_context(parts, &app_state).await?))
    }
}

/// O guardião: rejeita com 403 quem não tem a capacidade `T`.
pub struct RequireCapability<T>(pub AccessContext, pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireCapability<T>
where
    T: CapabilityDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let ctx = access_context(parts, &app_state).await?;

        if let Err(denied) = ctx.require(T::capability()) {
            let locale = Locale::from_request_parts(parts, &app_state).await.unwrap_or_default();
            tracing::info!("⛔ {} sem a capacidade '{}'", ctx.principal.id, T::capability());
            return Err(denied.to_api_error(&locale, &app_state.i18n_store));
        }

        Ok(RequireCapability(ctx, PhantomData))
    }
}

// ---
// CAPACIDADES (TIPOS)
// ---

pub struct CanCustomers;
impl CapabilityDef for CanCustomers {
    fn capability() -> Capability { Capability::Customers }
}

pub struct CanPayments;
impl CapabilityDef for CanPayments {
    fn capability() -> Capability { Capability::Payments }
}

pub struct CanBanners;
impl CapabilityDef for CanBanners {
    fn capability() -> Capability { Capability::Banners }
}

pub struct CanSettings;
impl CapabilityDef for CanSettings {
    fn capability() -> Capability { Capability::Settings }
}

pub struct CanUsers;
impl CapabilityDef for CanUsers {
    fn capability() -> Capability { Capability::Users }
}

pub struct CanResellers;
impl CapabilityDef for CanResellers {
    fn capability() -> Capability { Capability::Resellers }
}

pub struct CanPlans;
impl CapabilityDef for CanPlans {
    fn capability() -> Capability { Capability::Plans }
}
