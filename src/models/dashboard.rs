// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::customer::Customer;
use crate::models::lifecycle::Alert;

// Os cards do topo
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStats {
    pub total_customers: usize,
    pub active_customers: usize,
    pub expired_customers: usize,

    // Soma das mensalidades dos clientes ativos
    #[schema(value_type = f64)]
    pub monthly_revenue: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub stats: CustomerStats,
    pub alerts: Vec<Alert>,
    pub expiring_customers: Vec<Customer>,
}
