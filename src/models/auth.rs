// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::rbac::Capability;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

// Representa uma conta da coleção `db_usuarios`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub active: bool,

    #[serde(with = "crate::common::dates::flexible")]
    pub created_at: DateTime<Utc>,

    #[serde(default, with = "crate::common::dates::flexible_opt")]
    pub last_access: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    #[schema(example = "Administrador")]
    pub name: String,
    #[schema(example = "admin@iptv.com")]
    pub email: String,
    pub role: UserRole,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub last_access: Option<DateTime<Utc>>,
}

impl From<AdminUser> for UserResponse {
    fn from(u: AdminUser) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            active: u.active,
            created_at: u.created_at,
            last_access: u.last_access,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserAction {
    Activate,
    Deactivate,
    Promote,
    Demote,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ManageUserPayload {
    pub action: UserAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    Administrator,
    Reseller,
}

/// Quem está logado. Capacidades de revenda são resolvidas pelo `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: String,
    pub name: String,
    pub email: String,
    pub kind: PrincipalKind,
}

impl Principal {
    pub fn is_administrator(&self) -> bool {
        self.kind == PrincipalKind::Administrator
    }
}

impl From<&AdminUser> for Principal {
    fn from(user: &AdminUser) -> Self {
        // Conta rebaixada em `usuarios` não é administrador
        let kind = match user.role {
            UserRole::Admin => PrincipalKind::Administrator,
            UserRole::User => PrincipalKind::Reseller,
        };
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            kind,
        }
    }
}

// Sessão persistida (sobrevive a reinícios); o token carrega o `id`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub principal_id: String,
    pub email: String,

    #[serde(with = "crate::common::dates::flexible")]
    pub created_at: DateTime<Utc>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "admin@iptv.com")]
    pub email: String,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    #[schema(example = "admin123")]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeCredentialsPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub new_email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub new_password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub principal: Principal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    #[serde(flatten)]
    pub principal: Principal,
    pub admin_standing: bool,
    pub capabilities: Vec<Capability>,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (ID do principal)
    pub sid: String, // ID da sessão persistida
    pub exp: i64,    // Expiration time (quando o token expira)
    pub iat: i64,    // Issued At (quando o token foi criado)
}
