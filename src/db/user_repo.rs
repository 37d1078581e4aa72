// src/db/user_repo.rs

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::{
    common::error::AppError,
    db::store::RecordStore,
    models::auth::{AdminUser, UserRole},
};

const COLLECTION: &str = "usuarios";

// O repositório de usuários, responsável por todas as interações com `db_usuarios`
#[derive(Clone)]
pub struct UserRepository {
    store: RecordStore,
}

impl UserRepository {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub async fn list_all(&self) -> Result<Vec<AdminUser>, AppError> {
        self.store.load_all(COLLECTION).await
    }

    // Busca um usuário pelo seu e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, AppError> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .find(|u| u.email == email))
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id(&self, id: &str) -> Result<Option<AdminUser>, AppError> {
        self.store.find_by_id(COLLECTION, id).await
    }

    pub async fn save(&self, user: &AdminUser) -> Result<AdminUser, AppError> {
        self.store
            .update(COLLECTION, &user.id, &serde_json::to_value(user)?)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn touch_last_access(&self, id: &str, at: DateTime<Utc>) -> Result<(), AppError> {
        self.store
            .update::<AdminUser>(COLLECTION, id, &json!({ "lastAccess": at.to_rfc3339() }))
            .await?;
        Ok(())
    }

    /// Cria o administrador padrão quando não há nenhum usuário.
    pub async fn seed_default_admin(&self, now: DateTime<Utc>) -> Result<bool, AppError> {
        let admin = AdminUser {
            id: "admin".to_string(),
            name: "Administrador".to_string(),
            email: "admin@iptv.com".to_string(),
            password: "admin123".to_string(),
            role: UserRole::Admin,
            active: true,
            created_at: now,
            last_access: None,
        };
        self.store.seed_if_empty(COLLECTION, &[admin]).await
    }
}
