// src/db/reseller_repo.rs

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::{
    common::error::AppError,
    db::store::RecordStore,
    models::reseller::{Reseller, ResellerPatch},
};

const COLLECTION: &str = "revendas";

#[derive(Clone)]
pub struct ResellerRepository {
    store: RecordStore,
}

impl ResellerRepository {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// O "roster" completo; base das checagens de permissão.
    pub async fn list_all(&self) -> Result<Vec<Reseller>, AppError> {
        self.store.load_all(COLLECTION).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Reseller>, AppError> {
        self.store.find_by_id(COLLECTION, id).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Reseller>, AppError> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .find(|r| r.email == email))
    }

    pub async fn create(&self, reseller: &Reseller) -> Result<(), AppError> {
        self.store.insert(COLLECTION, reseller).await
    }

    pub async fn save(&self, reseller: &Reseller) -> Result<Reseller, AppError> {
        self.store
            .update(COLLECTION, &reseller.id, &serde_json::to_value(reseller)?)
            .await?
            .ok_or(AppError::ResellerNotFound)
    }

    /// A interface de escrita parcial usada pelas transições do motor.
    pub async fn apply_patch(&self, id: &str, patch: &ResellerPatch) -> Result<Reseller, AppError> {
        self.store
            .update(COLLECTION, id, &serde_json::to_value(patch)?)
            .await?
            .ok_or(AppError::ResellerNotFound)
    }

    /// Aplica o patch só se o registro gravado ainda satisfizer `condition`.
    pub async fn apply_patch_if<F>(
        &self,
        id: &str,
        patch: &ResellerPatch,
        condition: F,
    ) -> Result<Option<Reseller>, AppError>
    where
        F: FnOnce(&Reseller) -> bool,
    {
        self.store
            .update_if(COLLECTION, id, &serde_json::to_value(patch)?, condition)
            .await
    }

    pub async fn touch_last_access(&self, id: &str, at: DateTime<Utc>) -> Result<(), AppError> {
        self.store
            .update::<Reseller>(COLLECTION, id, &json!({ "lastAccess": at.to_rfc3339() }))
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.store.delete(COLLECTION, id).await? {
            return Err(AppError::ResellerNotFound);
        }
        Ok(())
    }
}
