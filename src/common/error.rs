// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;
use crate::models::rbac::Capability;

// Nosso tipo de erro, agora com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Permissão '{0}' negada")]
    Forbidden(Capability),

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Revenda não encontrada")]
    ResellerNotFound,

    #[error("Cliente não encontrado")]
    CustomerNotFound,

    #[error("Plano não encontrado")]
    PlanNotFound,

    #[error("Banner não encontrado")]
    BannerNotFound,

    #[error("Data inválida: {0}")]
    InvalidDate(String),

    #[error("Número de WhatsApp inválido")]
    InvalidPhoneNumber,

    // Falhas do backend de armazenamento (arquivos)
    #[error("Erro de armazenamento: {0}")]
    StorageError(#[from] std::io::Error),

    // Registro persistido que não corresponde ao formato esperado
    #[error("Erro de serialização: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

// O formato que efetivamente vai para o cliente HTTP
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl AppError {
    /// Converte o erro de domínio em resposta HTTP no idioma do cliente.
    pub fn to_api_error(self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();

        let (status, key) = match &self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), json!(messages));
                }
                return ApiError {
                    status: StatusCode::BAD_REQUEST,
                    error: i18n.translate(lang, "validation_error"),
                    details: Some(Value::Object(details)),
                };
            }
            AppError::Forbidden(capability) => {
                let message = i18n
                    .translate(lang, "forbidden")
                    .replace("{capability}", capability.slug());
                return ApiError {
                    status: StatusCode::FORBIDDEN,
                    error: message,
                    details: None,
                };
            }
            AppError::InvalidDate(raw) => {
                return ApiError {
                    status: StatusCode::BAD_REQUEST,
                    error: i18n.translate(lang, "invalid_date"),
                    details: Some(json!({ "value": raw })),
                };
            }
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "email_already_exists"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token"),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "user_not_found"),
            AppError::ResellerNotFound => (StatusCode::NOT_FOUND, "reseller_not_found"),
            AppError::CustomerNotFound => (StatusCode::NOT_FOUND, "customer_not_found"),
            AppError::PlanNotFound => (StatusCode::NOT_FOUND, "plan_not_found"),
            AppError::BannerNotFound => (StatusCode::NOT_FOUND, "banner_not_found"),
            AppError::InvalidPhoneNumber => (StatusCode::BAD_REQUEST, "invalid_phone_number"),

            // Todos os outros erros (armazenamento, JWT, interno) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        ApiError {
            status,
            error: i18n.translate(lang, key),
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt() -> Locale {
        Locale("pt".to_string())
    }

    #[test]
    fn forbidden_names_the_capability() {
        let api = AppError::Forbidden(Capability::Settings).to_api_error(&pt(), &I18nStore::new());
        assert_eq!(api.status, StatusCode::FORBIDDEN);
        assert!(api.error.contains("settings"));
    }

    #[test]
    fn internal_errors_hide_details() {
        let api = AppError::InternalServerError(anyhow::anyhow!("disco cheio"))
            .to_api_error(&Locale("en".to_string()), &I18nStore::new());
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("disco"));
    }

    #[test]
    fn not_found_variants_map_to_404() {
        for err in [AppError::CustomerNotFound, AppError::ResellerNotFound, AppError::PlanNotFound] {
            assert_eq!(err.to_api_error(&pt(), &I18nStore::new()).status, StatusCode::NOT_FOUND);
        }
    }
}
