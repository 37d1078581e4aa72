pub mod auth;
pub mod banner_service;
pub mod catalog_service;
pub mod customer_service;
pub mod dashboard_service;
pub mod lifecycle;
pub mod payment_service;
pub mod permissions;
pub mod reminder_service;
pub mod reseller_service;
pub mod settings_service;
pub mod sweeper;
pub mod user_service;
