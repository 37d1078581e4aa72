// src/db/customer_repo.rs

use chrono::NaiveDate;
use serde_json::json;

use crate::{
    common::error::AppError,
    db::store::RecordStore,
    models::customer::Customer,
};

const COLLECTION: &str = "clientes";

#[derive(Clone)]
pub struct CustomerRepository {
    store: RecordStore,
}

impl CustomerRepository {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub async fn list_all(&self) -> Result<Vec<Customer>, AppError> {
        self.store.load_all(COLLECTION).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Customer>, AppError> {
        self.store.find_by_id(COLLECTION, id).await
    }

    pub async fn create(&self, customer: &Customer) -> Result<(), AppError> {
        self.store.insert(COLLECTION, customer).await
    }

    pub async fn save(&self, customer: &Customer) -> Result<Customer, AppError> {
        self.store
            .update(COLLECTION, &customer.id, &serde_json::to_value(customer)?)
            .await?
            .ok_or(AppError::CustomerNotFound)
    }

    /// Escrita parcial: só a data do último pagamento.
    pub async fn set_last_payment_date(&self, id: &str, date: NaiveDate) -> Result<Customer, AppError> {
        self.store
            .update(COLLECTION, id, &json!({ "lastPaymentDate": date }))
            .await?
            .ok_or(AppError::CustomerNotFound)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.store.delete(COLLECTION, id).await? {
            return Err(AppError::CustomerNotFound);
        }
        Ok(())
    }
}
