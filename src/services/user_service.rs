// src/services/user_service.rs

use crate::{
    common::error::AppError,
    db::{SessionRepository, UserRepository},
    models::auth::{AdminUser, UserAction, UserRole},
};

#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
    session_repo: SessionRepository,
}

impl UserService {
    pub fn new(repo: UserRepository, session_repo: SessionRepository) -> Self {
        Self { repo, session_repo }
    }

    pub async fn list(&self) -> Result<Vec<AdminUser>, AppError> {
        self.repo.list_all().await
    }

    /// ativar / desativar / promover / rebaixar
    pub async fn manage(&self, id: &str, action: UserAction) -> Result<AdminUser, AppError> {
        let mut user = self.repo.find_by_id(id).await?.ok_or(AppError::UserNotFound)?;

        match action {
            UserAction::Activate => user.active = true,
            UserAction::Deactivate => user.active = false,
            UserAction::Promote => user.role = UserRole::Admin,
            UserAction::Demote => user.role = UserRole::User,
        }

        let saved = self.repo.save(&user).await?;
        if action == UserAction::Deactivate {
            self.session_repo.delete_by_principal(&saved.id).await?;
        }
        tracing::info!("👤 Usuário {}: {:?}", saved.id, action);
        Ok(saved)
    }
}
