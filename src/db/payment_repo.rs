// src/db/payment_repo.rs

use crate::{
    common::error::AppError,
    db::store::RecordStore,
    models::payment::Payment,
};

const COLLECTION: &str = "pagamentos";

#[derive(Clone)]
pub struct PaymentRepository {
    store: RecordStore,
}

impl PaymentRepository {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub async fn list_all(&self) -> Result<Vec<Payment>, AppError> {
        self.store.load_all(COLLECTION).await
    }

    pub async fn create(&self, payment: &Payment) -> Result<(), AppError> {
        self.store.insert(COLLECTION, payment).await
    }

    /// Histórico inteiro de um cliente (exclusão em cascata).
    pub async fn delete_by_customer(&self, customer_id: &str) -> Result<usize, AppError> {
        self.store
            .delete_where(COLLECTION, "customerId", customer_id)
            .await
    }
}
