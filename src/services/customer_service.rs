// src/services/customer_service.rs

use std::sync::Arc;
use uuid::Uuid;

use crate::{
    common::{clock::Clock, dates::parse_instant, error::AppError},
    db::{CustomerRepository, PaymentRepository},
    models::customer::{
        CreateCustomerPayload, Customer, CustomerFilter, CustomerStatus, UpdateCustomerPayload,
    },
    services::{lifecycle, permissions::AccessContext},
};

#[derive(Clone)]
pub struct CustomerService {
    repo: CustomerRepository,
    payment_repo: PaymentRepository,
    clock: Arc<dyn Clock>,
}

/// Busca por nome (sem diferenciar maiúsculas) ou trecho do WhatsApp.
pub fn matches_filter(customer: &Customer, filter: &CustomerFilter) -> bool {
    let text_ok = match filter.search.as_deref().map(str::trim) {
        Some(term) if !term.is_empty() => {
            customer.name.to_lowercase().contains(&term.to_lowercase())
                || customer.whatsapp.contains(term)
        }
        _ => true,
    };
    let status_ok = filter.status.is_none_or(|status| customer.status == status);
    text_ok && status_ok
}

impl CustomerService {
    pub fn new(repo: CustomerRepository, payment_repo: PaymentRepository, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            payment_repo,
            clock,
        }
    }

    /// Clientes que o principal enxerga.
    pub async fn visible(&self, ctx: &AccessContext) -> Result<Vec<Customer>, AppError> {
        Ok(self
            .repo
            .list_all()
            .await?
            .into_iter()
            .filter(|c| ctx.can_see(&c.owner_id))
            .collect())
    }

    pub async fn list(&self, ctx: &AccessContext, filter: &CustomerFilter) -> Result<Vec<Customer>, AppError> {
        Ok(self
            .visible(ctx)
            .await?
            .into_iter()
            .filter(|c| matches_filter(c, filter))
            .collect())
    }

    pub async fn get(&self, ctx: &AccessContext, id: &str) -> Result<Customer, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .filter(|c| ctx.can_see(&c.owner_id))
            .ok_or(AppError::CustomerNotFound)
    }

    pub async fn create(&self, ctx: &AccessContext, payload: CreateCustomerPayload) -> Result<Customer, AppError> {
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: payload.name,
            whatsapp: payload.whatsapp,
            plan: payload.plan,
            status: payload.status.unwrap_or(CustomerStatus::Active),
            monthly_fee: payload.monthly_fee,
            expiration_date: parse_instant(&payload.expiration_date)?,
            last_payment_date: payload.last_payment_date,
            notes: payload.notes.unwrap_or_default(),
            created_at: self.clock.now().date_naive(),
            owner_id: ctx.principal.id.clone(),
        };

        self.repo.create(&customer).await?;
        Ok(customer)
    }

    pub async fn update(
        &self,
        ctx: &AccessContext,
        id: &str,
        payload: UpdateCustomerPayload,
    ) -> Result<Customer, AppError> {
        let mut customer = self.get(ctx, id).await?;

        if let Some(name) = payload.name {
            customer.name = name;
        }
        if let Some(whatsapp) = payload.whatsapp {
            customer.whatsapp = whatsapp;
        }
        if let Some(plan) = payload.plan {
            customer.plan = plan;
        }
        if let Some(status) = payload.status {
            customer.status = status;
        }
        if let Some(fee) = payload.monthly_fee {
            customer.monthly_fee = fee;
        }
        if let Some(raw) = payload.expiration_date {
            customer.expiration_date = parse_instant(&raw)?;
        }
        if payload.last_payment_date.is_some() {
            customer.last_payment_date = payload.last_payment_date;
        }
        if let Some(notes) = payload.notes {
            customer.notes = notes;
        }

        self.repo.save(&customer).await
    }

    /// Apaga o cliente e todo o seu histórico de pagamentos.
    pub async fn delete(&self, ctx: &AccessContext, id: &str) -> Result<(), AppError> {
        let customer = self.get(ctx, id).await?;
        self.repo.delete(&customer.id).await?;
        let removed = self.payment_repo.delete_by_customer(&customer.id).await?;
        tracing::info!("🗑️ Cliente {} removido ({} pagamentos)", customer.id, removed);
        Ok(())
    }

    pub async fn expiring_soon(&self, ctx: &AccessContext) -> Result<Vec<Customer>, AppError> {
        let customers = self.visible(ctx).await?;
        Ok(lifecycle::customers_expiring_soon(self.clock.now(), &customers)
            .into_iter()
            .cloned()
            .collect())
    }
}
