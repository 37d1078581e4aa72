pub mod auth;
pub mod banners;
pub mod content;
pub mod customers;
pub mod dashboard;
pub mod payments;
pub mod resellers;
pub mod settings;
pub mod users;
