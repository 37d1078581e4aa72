// src/db/banner_repo.rs

use crate::{
    common::error::AppError,
    db::store::RecordStore,
    models::banner::Banner,
};

const COLLECTION: &str = "banners";

#[derive(Clone)]
pub struct BannerRepository {
    store: RecordStore,
}

impl BannerRepository {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub async fn list_all(&self) -> Result<Vec<Banner>, AppError> {
        self.store.load_all(COLLECTION).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Banner>, AppError> {
        self.store.find_by_id(COLLECTION, id).await
    }

    pub async fn create(&self, banner: &Banner) -> Result<(), AppError> {
        self.store.insert(COLLECTION, banner).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.store.delete(COLLECTION, id).await? {
            return Err(AppError::BannerNotFound);
        }
        Ok(())
    }
}
