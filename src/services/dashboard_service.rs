// src/services/dashboard_service.rs

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::{
        customer::{Customer, CustomerStatus},
        dashboard::{CustomerStats, DashboardSummary},
    },
    services::{
        customer_service::CustomerService, permissions::AccessContext,
        reseller_service::ResellerService,
    },
};

/// Os cards do topo: total, ativos, vencidos e a receita dos ativos.
pub fn customer_stats(customers: &[Customer]) -> CustomerStats {
    let active: Vec<&Customer> = customers
        .iter()
        .filter(|c| c.status == CustomerStatus::Active)
        .collect();

    CustomerStats {
        total_customers: customers.len(),
        active_customers: active.len(),
        expired_customers: customers
            .iter()
            .filter(|c| c.status == CustomerStatus::Expired)
            .count(),
        monthly_revenue: active.iter().map(|c| c.monthly_fee).sum::<Decimal>(),
    }
}

#[derive(Clone)]
pub struct DashboardService {
    customer_service: CustomerService,
    reseller_service: ResellerService,
}

impl DashboardService {
    pub fn new(customer_service: CustomerService, reseller_service: ResellerService) -> Self {
        Self {
            customer_service,
            reseller_service,
        }
    }

    /// Abrir o painel também roda a avaliação de vencimentos (e grava bloqueios).
    ///
    /// Admin/master veem os alertas de todas as revendas; a revenda, só os seus.
    pub async fn get_summary(&self, ctx: &AccessContext) -> Result<DashboardSummary, AppError> {
        let customers = self.customer_service.visible(ctx).await?;
        let report = self.reseller_service.run_expiration_check().await?;

        let alerts = if ctx.has_admin_standing() {
            report.alerts
        } else {
            report
                .alerts
                .into_iter()
                .filter(|a| a.reseller_id == ctx.principal.id)
                .collect()
        };

        Ok(DashboardSummary {
            stats: customer_stats(&customers),
            alerts,
            expiring_customers: self.customer_service.expiring_soon(ctx).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn customer(status: CustomerStatus, cents: i64) -> Customer {
        Customer {
            id: format!("{status:?}-{cents}"),
            name: "Cliente".into(),
            whatsapp: "11999999999".into(),
            plan: "Básico".into(),
            status,
            monthly_fee: Decimal::new(cents, 2),
            expiration_date: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
            last_payment_date: None,
            notes: String::new(),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            owner_id: "admin".into(),
        }
    }

    #[test]
    fn revenue_counts_only_active_customers() {
        let customers = vec![
            customer(CustomerStatus::Active, 2990),
            customer(CustomerStatus::Active, 4990),
            customer(CustomerStatus::Expired, 7990),
            customer(CustomerStatus::Suspended, 9990),
        ];

        let stats = customer_stats(&customers);
        assert_eq!(stats.total_customers, 4);
        assert_eq!(stats.active_customers, 2);
        assert_eq!(stats.expired_customers, 1);
        assert_eq!(stats.monthly_revenue, Decimal::new(7980, 2));
    }

    #[test]
    fn empty_roster_has_zero_revenue() {
        let stats = customer_stats(&[]);
        assert_eq!(stats.total_customers, 0);
        assert_eq!(stats.monthly_revenue, Decimal::ZERO);
    }
}
