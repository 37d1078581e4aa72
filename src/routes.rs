// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn create_router(app_state: AppState) -> Router {
    // Rotas públicas
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Sessão do principal logado
    let session_routes = Router::new()
        .route("/logout", post(handlers::auth::logout))
        .route("/me", get(handlers::auth::get_me))
        .route("/credentials", put(handlers::auth::change_credentials));

    let customer_routes = Router::new()
        .route("/"
               ,post(handlers::customers::create_customer)
               .get(handlers::customers::list_customers)
        )
        .route("/expiring", get(handlers::customers::list_expiring_customers))
        .route("/{id}"
               ,get(handlers::customers::get_customer)
               .put(handlers::customers::update_customer)
               .delete(handlers::customers::delete_customer)
        )
        .route("/{id}/payments", post(handlers::payments::record_payment))
        .route("/{id}/reminder", post(handlers::payments::build_reminder));

    let reseller_routes = Router::new()
        .route("/"
               ,post(handlers::resellers::create_reseller)
               .get(handlers::resellers::list_resellers)
        )
        .route("/{id}"
               ,put(handlers::resellers::update_reseller)
               .delete(handlers::resellers::delete_reseller)
        )
        .route("/{id}/actions", post(handlers::resellers::manage_reseller));

    let banner_routes = Router::new()
        .route("/"
               ,post(handlers::banners::create_banner)
               .get(handlers::banners::list_banners)
        )
        .route("/{id}", axum::routing::delete(handlers::banners::delete_banner));

    let content_routes = Router::new()
        .route("/search", get(handlers::content::search_content))
        .route("/lookup", get(handlers::content::lookup_content))
        .route("/matches", get(handlers::content::list_matches));

    let user_routes = Router::new()
        .route("/", get(handlers::users::list_users))
        .route("/{id}/actions", post(handlers::users::manage_user));

    // Tudo aqui passa pelo auth_guard
    let protected = Router::new()
        .nest("/api/auth", session_routes)
        .nest("/api/customers", customer_routes)
        .nest("/api/resellers", reseller_routes)
        .nest("/api/banners", banner_routes)
        .nest("/api/content", content_routes)
        .nest("/api/users", user_routes)
        .route("/api/payments", get(handlers::payments::list_payments))
        .route("/api/profile/logo", put(handlers::resellers::update_own_logo))
        .route("/api/plans", get(handlers::settings::list_plans))
        .route("/api/plans/{id}", put(handlers::settings::update_plan))
        .route("/api/settings"
               ,get(handlers::settings::get_settings)
               .put(handlers::settings::update_settings)
        )
        .route("/api/dashboard/summary", get(handlers::dashboard::get_summary))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .merge(protected)
        .with_state(app_state)
}
