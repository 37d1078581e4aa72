// src/config.rs

use anyhow::Context;
use std::{env, path::PathBuf, sync::Arc, time::Duration};

use crate::{
    common::{
        clock::{Clock, SystemClock},
        i18n::I18nStore,
    },
    db::{
        BannerRepository, CustomerRepository, PaymentRepository, RecordStore, ResellerRepository,
        SessionRepository, SettingsRepository, UserRepository,
    },
    services::{
        auth::AuthService, banner_service::BannerService, customer_service::CustomerService,
        dashboard_service::DashboardService, payment_service::PaymentService,
        reminder_service::ReminderService, reseller_service::ResellerService,
        settings_service::SettingsService, user_service::UserService,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    File,
    Memory,
}

// Tudo o que vem do ambiente (.env)
#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub data_dir: PathBuf,
    pub storage: StorageKind,
    pub bind_addr: String,
    // None desliga a varredura periódica
    pub sweep_interval: Option<Duration>,
    pub session_ttl_days: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let storage = match env::var("STORAGE").unwrap_or_else(|_| "file".into()).as_str() {
            "file" => StorageKind::File,
            "memory" => StorageKind::Memory,
            other => anyhow::bail!("STORAGE inválido: '{}' (use 'file' ou 'memory')", other),
        };

        let sweep_secs: u64 = env::var("SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .context("SWEEP_INTERVAL_SECS deve ser um número de segundos")?;

        let session_ttl_days: i64 = env::var("SESSION_TTL_DAYS")
            .unwrap_or_else(|_| "7".into())
            .parse()
            .context("SESSION_TTL_DAYS deve ser um número de dias")?;

        Ok(Self {
            jwt_secret,
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()).into(),
            storage,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into()),
            sweep_interval: (sweep_secs > 0).then(|| Duration::from_secs(sweep_secs)),
            session_ttl_days,
        })
    }

    /// Configuração mínima para testes: armazenamento em memória, sem varredura.
    pub fn for_tests(jwt_secret: &str) -> Self {
        Self {
            jwt_secret: jwt_secret.to_string(),
            data_dir: PathBuf::from("./data"),
            storage: StorageKind::Memory,
            bind_addr: "127.0.0.1:0".into(),
            sweep_interval: None,
            session_ttl_days: 7,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub clock: Arc<dyn Clock>,
    pub i18n_store: I18nStore,

    pub reseller_repo: ResellerRepository,

    pub auth_service: AuthService,
    pub customer_service: CustomerService,
    pub payment_service: PaymentService,
    pub reminder_service: ReminderService,
    pub reseller_service: ResellerService,
    pub banner_service: BannerService,
    pub settings_service: SettingsService,
    pub user_service: UserService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let store = match config.storage {
            StorageKind::File => RecordStore::file(config.data_dir.clone())
                .with_context(|| format!("Falha ao abrir {}", config.data_dir.display()))?,
            StorageKind::Memory => RecordStore::in_memory(),
        };
        tracing::info!("✅ Armazenamento pronto ({:?})", config.storage);

        Self::with_store(config, store, Arc::new(SystemClock)).await
    }

    /// Monta o gráfico de dependências sobre um armazenamento e um relógio já prontos.
    pub async fn with_store(config: &Config, store: RecordStore, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        let user_repo = UserRepository::new(store.clone());
        let reseller_repo = ResellerRepository::new(store.clone());
        let customer_repo = CustomerRepository::new(store.clone());
        let payment_repo = PaymentRepository::new(store.clone());
        let banner_repo = BannerRepository::new(store.clone());
        let settings_repo = SettingsRepository::new(store.clone());
        let session_repo = SessionRepository::new(store.clone());

        if user_repo.seed_default_admin(clock.now()).await? {
            tracing::info!("👤 Administrador padrão criado (admin@iptv.com)");
        }
        if settings_repo.seed_plans().await? {
            tracing::info!("📦 Catálogo de planos inicial gravado");
        }

        let auth_service = AuthService::new(
            user_repo.clone(),
            reseller_repo.clone(),
            session_repo.clone(),
            config.jwt_secret.clone(),
            chrono::Duration::days(config.session_ttl_days),
            clock.clone(),
        );
        let customer_service = CustomerService::new(customer_repo.clone(), payment_repo.clone(), clock.clone());
        let reseller_service = ResellerService::new(
            reseller_repo.clone(),
            session_repo.clone(),
            auth_service.clone(),
            clock.clone(),
        );

        Ok(Self {
            payment_service: PaymentService::new(payment_repo, customer_repo.clone(), clock.clone()),
            reminder_service: ReminderService::new(customer_repo, clock.clone()),
            banner_service: BannerService::new(banner_repo, settings_repo.clone(), clock.clone()),
            settings_service: SettingsService::new(settings_repo),
            user_service: UserService::new(user_repo, session_repo),
            dashboard_service: DashboardService::new(customer_service.clone(), reseller_service.clone()),
            clock,
            i18n_store: I18nStore::new(),
            reseller_repo,
            auth_service,
            customer_service,
            reseller_service,
        })
    }
}
