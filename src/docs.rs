// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::get_me,
        handlers::auth::change_credentials,

        // --- Clientes ---
        handlers::customers::list_customers,
        handlers::customers::list_expiring_customers,
        handlers::customers::create_customer,
        handlers::customers::get_customer,
        handlers::customers::update_customer,
        handlers::customers::delete_customer,

        // --- Pagamentos ---
        handlers::payments::list_payments,
        handlers::payments::record_payment,
        handlers::payments::build_reminder,

        // --- Revendas ---
        handlers::resellers::list_resellers,
        handlers::resellers::create_reseller,
        handlers::resellers::update_reseller,
        handlers::resellers::delete_reseller,
        handlers::resellers::manage_reseller,
        handlers::resellers::update_own_logo,

        // --- Banners / Conteúdo ---
        handlers::banners::list_banners,
        handlers::banners::create_banner,
        handlers::banners::delete_banner,
        handlers::content::search_content,
        handlers::content::lookup_content,
        handlers::content::list_matches,

        // --- Planos / Configurações ---
        handlers::settings::get_settings,
        handlers::settings::update_settings,
        handlers::settings::list_plans,
        handlers::settings::update_plan,

        // --- Usuários ---
        handlers::users::list_users,
        handlers::users::manage_user,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::UserResponse,
            models::auth::UserAction,
            models::auth::ManageUserPayload,
            models::auth::PrincipalKind,
            models::auth::Principal,
            models::auth::LoginPayload,
            models::auth::ChangeCredentialsPayload,
            models::auth::AuthResponse,
            models::auth::MeResponse,

            // --- RBAC ---
            models::rbac::Capability,
            models::rbac::Permissions,

            // --- Revendas ---
            models::reseller::ResellerTier,
            models::reseller::ResellerResponse,
            models::reseller::CreateResellerPayload,
            models::reseller::UpdateResellerPayload,
            models::reseller::ResellerAction,
            models::reseller::ManageResellerPayload,
            models::reseller::UpdateLogoPayload,

            // --- Clientes / Pagamentos ---
            models::customer::CustomerStatus,
            models::customer::Customer,
            models::customer::CreateCustomerPayload,
            models::customer::UpdateCustomerPayload,
            models::payment::PaymentStatus,
            models::payment::Payment,
            models::payment::RecordPaymentPayload,
            models::payment::ReminderPayload,
            models::payment::ReminderLink,

            // --- Banners / Conteúdo ---
            models::banner::LogoPosition,
            models::banner::BannerCategory,
            models::banner::Banner,
            models::banner::CreateBannerPayload,
            models::content::ContentKind,
            models::content::ContentResult,
            models::content::MatchStatus,
            models::content::FootballMatch,

            // --- Planos / Configurações ---
            models::settings::SystemConfig,
            models::settings::UpdateSettingsRequest,
            models::settings::Plan,
            models::settings::UpdatePlanPayload,

            // --- Dashboard ---
            models::lifecycle::AlertKind,
            models::lifecycle::Alert,
            models::dashboard::CustomerStats,
            models::dashboard::DashboardSummary,
        )
    ),
    tags(
        (name = "Auth", description = "Login, sessão e credenciais"),
        (name = "Clientes", description = "Cadastro e busca de clientes"),
        (name = "Pagamentos", description = "Pagamentos e lembretes via WhatsApp"),
        (name = "Revendas", description = "Revendas, bloqueio e renovação"),
        (name = "Banners", description = "Banners promocionais"),
        (name = "Conteúdo", description = "Acervo de filmes/séries e agenda de jogos"),
        (name = "Planos", description = "Catálogo de planos"),
        (name = "Configurações", description = "Configuração do painel"),
        (name = "Usuários", description = "Contas administrativas"),
        (name = "Dashboard", description = "Indicadores e alertas de vencimento")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
