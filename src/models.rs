pub mod auth;
pub mod banner;
pub mod content;
pub mod customer;
pub mod dashboard;
pub mod lifecycle;
pub mod payment;
pub mod rbac;
pub mod reseller;
pub mod settings;
