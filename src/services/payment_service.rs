// src/services/payment_service.rs

use std::sync::Arc;
use uuid::Uuid;

use crate::{
    common::{clock::Clock, error::AppError},
    db::{CustomerRepository, PaymentRepository},
    models::payment::{Payment, PaymentStatus, RecordPaymentPayload},
    services::permissions::AccessContext,
};

#[derive(Clone)]
pub struct PaymentService {
    repo: PaymentRepository,
    customer_repo: CustomerRepository,
    clock: Arc<dyn Clock>,
}

impl PaymentService {
    pub fn new(repo: PaymentRepository, customer_repo: CustomerRepository, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            customer_repo,
            clock,
        }
    }

    pub async fn list(&self, ctx: &AccessContext) -> Result<Vec<Payment>, AppError> {
        Ok(self
            .repo
            .list_all()
            .await?
            .into_iter()
            .filter(|p| ctx.can_see(&p.owner_id))
            .collect())
    }

    /// Registra o pagamento de um cliente visível.
    ///
    /// Pagamento quitado também atualiza `lastPaymentDate` do cliente.
    pub async fn record(
        &self,
        ctx: &AccessContext,
        customer_id: &str,
        payload: RecordPaymentPayload,
    ) -> Result<Payment, AppError> {
        let customer = self
            .customer_repo
            .find_by_id(customer_id)
            .await?
            .filter(|c| ctx.can_see(&c.owner_id))
            .ok_or(AppError::CustomerNotFound)?;

        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
            amount: payload.amount,
            date: payload.date.unwrap_or_else(|| self.clock.now().date_naive()),
            status: payload.status.unwrap_or(PaymentStatus::Paid),
            method: payload.method,
            owner_id: customer.owner_id.clone(),
        };
        self.repo.create(&payment).await?;

        if payment.status == PaymentStatus::Paid {
            self.customer_repo
                .set_last_payment_date(&customer.id, payment.date)
                .await?;
        }

        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::clock::FixedClock,
        db::{KeyValueBackend, MemoryBackend, RecordStore},
        models::{
            auth::{Principal, PrincipalKind},
            customer::{Customer, CustomerStatus},
        },
    };
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    // Primeira leitura de clientes devolve uma cópia antiga
    struct StaleCustomersBackend {
        inner: MemoryBackend,
        stale: std::sync::Mutex<Option<String>>,
    }

    #[async_trait::async_trait]
    impl KeyValueBackend for StaleCustomersBackend {
        async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
            if key == "db_clientes" {
                if let Some(snapshot) = self.stale.lock().unwrap().take() {
                    return Ok(Some(snapshot));
                }
            }
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<(), AppError> {
            self.inner.remove(key).await
        }
    }

    fn admin() -> AccessContext {
        AccessContext::new(
            Principal {
                id: "admin".into(),
                name: "Administrador".into(),
                email: "admin@iptv.com".into(),
                kind: PrincipalKind::Administrator,
            },
            Vec::new(),
        )
    }

    fn customer(name: &str) -> Customer {
        Customer {
            id: "c1".into(),
            name: name.into(),
            whatsapp: "11999999999".into(),
            plan: "Premium".into(),
            status: CustomerStatus::Active,
            monthly_fee: Decimal::new(4990, 2),
            expiration_date: Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap(),
            last_payment_date: None,
            notes: String::new(),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            owner_id: "admin".into(),
        }
    }

    fn payload() -> RecordPaymentPayload {
        RecordPaymentPayload {
            amount: Decimal::new(4990, 2),
            date: None,
            status: None,
            method: "PIX".into(),
        }
    }

    #[tokio::test]
    async fn paid_payment_only_touches_last_payment_date() {
        let backend = Arc::new(StaleCustomersBackend {
            inner: MemoryBackend::default(),
            stale: std::sync::Mutex::new(None),
        });
        let store = RecordStore::new(backend.clone());
        let customers = CustomerRepository::new(store.clone());
        let service = PaymentService::new(
            PaymentRepository::new(store),
            customers.clone(),
            Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap())),
        );

        customers.create(&customer("Maria")).await.unwrap();
        let before_edit = backend.inner.get("db_clientes").await.unwrap().unwrap();
        customers.save(&customer("Maria Santos")).await.unwrap();
        *backend.stale.lock().unwrap() = Some(before_edit);

        let payment = service.record(&admin(), "c1", payload()).await.unwrap();
        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());

        let stored = customers.find_by_id("c1").await.unwrap().unwrap();
        assert_eq!(stored.name, "Maria Santos");
        assert_eq!(stored.last_payment_date, Some(payment.date));
    }

    #[tokio::test]
    async fn pending_payment_leaves_the_customer_alone() {
        let store = RecordStore::in_memory();
        let customers = CustomerRepository::new(store.clone());
        let service = PaymentService::new(
            PaymentRepository::new(store),
            customers.clone(),
            Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap())),
        );
        customers.create(&customer("Maria")).await.unwrap();

        let pending = RecordPaymentPayload {
            status: Some(PaymentStatus::Pending),
            ..payload()
        };
        service.record(&admin(), "c1", pending).await.unwrap();

        let stored = customers.find_by_id("c1").await.unwrap().unwrap();
        assert_eq!(stored.last_payment_date, None);
        assert_eq!(service.list(&admin()).await.unwrap().len(), 1);
    }
}
