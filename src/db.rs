pub mod store;
pub use store::{FileBackend, KeyValueBackend, MemoryBackend, RecordStore};
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod reseller_repo;
pub use reseller_repo::ResellerRepository;
pub mod customer_repo;
pub use customer_repo::CustomerRepository;
pub mod payment_repo;
pub use payment_repo::PaymentRepository;
pub mod banner_repo;
pub use banner_repo::BannerRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
pub mod session_repo;
pub use session_repo::SessionRepository;
