// src/db/session_repo.rs

use crate::{
    common::error::AppError,
    db::store::RecordStore,
    models::auth::Session,
};

const COLLECTION: &str = "sessoes";

#[derive(Clone)]
pub struct SessionRepository {
    store: RecordStore,
}

impl SessionRepository {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, session: &Session) -> Result<(), AppError> {
        self.store.insert(COLLECTION, session).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Session>, AppError> {
        self.store.find_by_id(COLLECTION, id).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        self.store.delete(COLLECTION, id).await
    }

    /// Derruba todas as sessões de um principal (exclusão de revenda, troca de senha).
    pub async fn delete_by_principal(&self, principal_id: &str) -> Result<usize, AppError> {
        self.store
            .delete_where(COLLECTION, "principalId", principal_id)
            .await
    }
}
