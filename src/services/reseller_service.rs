// src/services/reseller_service.rs

use chrono::Duration;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    common::{clock::Clock, dates::parse_instant, error::AppError},
    db::{ResellerRepository, SessionRepository},
    models::{
        lifecycle::ExpirationReport,
        rbac::Permissions,
        reseller::{
            CreateResellerPayload, Reseller, ResellerAction, ResellerPatch, ResellerTier,
            UpdateLogoPayload, UpdateResellerPayload,
        },
    },
    services::{auth::AuthService, lifecycle, permissions::AccessContext},
};

pub const DEFAULT_TRIAL_DAYS: i64 = 30;

fn default_monthly_fee() -> Decimal {
    Decimal::new(5000, 2)
}

// Master sempre grava o mapa completo (sem configurações)
fn permissions_for(tier: ResellerTier, requested: Option<Permissions>) -> Permissions {
    match tier {
        ResellerTier::Master => Permissions::master(),
        ResellerTier::Simple => requested.unwrap_or_else(Permissions::simple_defaults),
    }
}

#[derive(Clone)]
pub struct ResellerService {
    repo: ResellerRepository,
    session_repo: SessionRepository,
    auth_service: AuthService,
    clock: Arc<dyn Clock>,
}

impl ResellerService {
    pub fn new(
        repo: ResellerRepository,
        session_repo: SessionRepository,
        auth_service: AuthService,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            session_repo,
            auth_service,
            clock,
        }
    }

    pub async fn list(&self) -> Result<Vec<Reseller>, AppError> {
        self.repo.list_all().await
    }

    pub async fn get(&self, id: &str) -> Result<Reseller, AppError> {
        self.repo.find_by_id(id).await?.ok_or(AppError::ResellerNotFound)
    }

    pub async fn create(&self, payload: CreateResellerPayload) -> Result<Reseller, AppError> {
        self.auth_service.ensure_email_free(&payload.email, "").await?;

        let now = self.clock.now();
        let expiration_date = match payload.expiration_date.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_instant(raw)?,
            _ => now + Duration::days(DEFAULT_TRIAL_DAYS),
        };
        let tier = payload.tier.unwrap_or(ResellerTier::Simple);

        let reseller = Reseller {
            id: Uuid::new_v4().to_string(),
            name: payload.name,
            email: payload.email,
            password: payload.password,
            active: true,
            blocked: false,
            tier,
            monthly_fee: payload.monthly_fee.unwrap_or_else(default_monthly_fee),
            expiration_date,
            created_at: now,
            last_access: None,
            notes: payload.notes.unwrap_or_default(),
            custom_logo_url: None,
            logo_position: Default::default(),
            alert_lead_days: payload.alert_lead_days.or(Some(lifecycle::DEFAULT_ALERT_LEAD_DAYS)),
            permissions: permissions_for(tier, payload.permissions),
        };

        self.repo.create(&reseller).await?;
        tracing::info!("🏪 Revenda criada: {} ({:?})", reseller.name, reseller.tier);
        Ok(reseller)
    }

    pub async fn update(&self, id: &str, payload: UpdateResellerPayload) -> Result<Reseller, AppError> {
        let mut reseller = self.get(id).await?;

        if let Some(email) = payload.email {
            self.auth_service.ensure_email_free(&email, id).await?;
            reseller.email = email;
        }
        if let Some(name) = payload.name {
            reseller.name = name;
        }
        if let Some(password) = payload.password {
            reseller.password = password;
        }
        if let Some(fee) = payload.monthly_fee {
            reseller.monthly_fee = fee;
        }
        if let Some(raw) = payload.expiration_date {
            reseller.expiration_date = parse_instant(&raw)?;
        }
        if let Some(lead) = payload.alert_lead_days {
            reseller.alert_lead_days = Some(lead);
        }
        if let Some(notes) = payload.notes {
            reseller.notes = notes;
        }

        let tier = payload.tier.unwrap_or(reseller.tier);
        if payload.tier.is_some() || payload.permissions.is_some() {
            reseller.tier = tier;
            reseller.permissions = permissions_for(tier, payload.permissions.or(Some(reseller.permissions)));
        }

        self.repo.save(&reseller).await
    }

    /// Remove a revenda e derruba as sessões dela.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.repo.delete(id).await?;
        let dropped = self.session_repo.delete_by_principal(id).await?;
        tracing::info!("🗑️ Revenda {} removida ({} sessões encerradas)", id, dropped);
        Ok(())
    }

    /// bloquear / desbloquear / renovar. Renovar não desbloqueia.
    pub async fn manage(&self, id: &str, action: ResellerAction) -> Result<Reseller, AppError> {
        let patch = match action {
            ResellerAction::Block => ResellerPatch::blocked(),
            ResellerAction::Unblock => ResellerPatch::unblocked(),
            ResellerAction::Renew => ResellerPatch::renewed(lifecycle::renewal_expiration(self.clock.now())?),
        };

        let reseller = self.repo.apply_patch(id, &patch).await?;
        tracing::info!("🔧 Revenda {}: {:?}", reseller.id, action);
        Ok(reseller)
    }

    /// A revenda logada troca a própria logo de banners.
    pub async fn update_own_logo(&self, ctx: &AccessContext, payload: UpdateLogoPayload) -> Result<Reseller, AppError> {
        let mut reseller = ctx.own_reseller().cloned().ok_or(AppError::ResellerNotFound)?;
        reseller.custom_logo_url = Some(payload.logo_url);
        reseller.logo_position = payload.position;
        self.repo.save(&reseller).await
    }

    /// Avalia o roster inteiro e grava só os bloqueios que mudam estado.
    ///
    /// Cada bloqueio é reconferido contra o registro gravado no momento da
    /// escrita: revenda renovada ou já bloqueada nesse meio tempo fica como está.
    pub async fn run_expiration_check(&self) -> Result<ExpirationReport, AppError> {
        let now = self.clock.now();
        let resellers = self.repo.list_all().await?;
        let mut report = lifecycle::evaluate_expirations(now, &resellers);

        for transition in report.blocks.iter_mut().filter(|t| t.newly_blocked) {
            let applied = self
                .repo
                .apply_patch_if(&transition.reseller_id, &ResellerPatch::blocked(), |current| {
                    lifecycle::days_remaining(now, current.expiration_date) < 0
                        && (!current.blocked || current.active)
                })
                .await?;

            match applied {
                Some(_) => tracing::info!("🚫 Revenda {} bloqueada por vencimento", transition.reseller_id),
                None => {
                    transition.newly_blocked = false;
                    tracing::debug!("Revenda {} mudou antes do bloqueio; mantida", transition.reseller_id);
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::clock::FixedClock,
        db::{KeyValueBackend, MemoryBackend, RecordStore, UserRepository},
    };
    use chrono::{DateTime, TimeZone, Utc};

    fn service(store: &RecordStore, clock: Arc<FixedClock>) -> ResellerService {
        let repo = ResellerRepository::new(store.clone());
        let sessions = SessionRepository::new(store.clone());
        let auth = AuthService::new(
            UserRepository::new(store.clone()),
            repo.clone(),
            sessions.clone(),
            "segredo".into(),
            Duration::days(7),
            clock.clone(),
        );
        ResellerService::new(repo, sessions, auth, clock)
    }

    fn payload(email: &str, expiration: Option<&str>) -> CreateResellerPayload {
        CreateResellerPayload {
            name: "Revenda Sul".into(),
            email: email.into(),
            password: "123456".into(),
            monthly_fee: None,
            expiration_date: expiration.map(str::to_string),
            tier: None,
            permissions: None,
            alert_lead_days: None,
            notes: None,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn create_applies_defaults() {
        let store = RecordStore::in_memory();
        let clock = Arc::new(FixedClock::new(at(2024, 1, 1, 9)));
        let svc = service(&store, clock);

        let r = svc.create(payload("sul@revenda.com", None)).await.unwrap();
        assert_eq!(r.expiration_date, at(2024, 1, 31, 9));
        assert_eq!(r.monthly_fee, Decimal::new(5000, 2));
        assert_eq!(r.tier, ResellerTier::Simple);
        assert_eq!(r.alert_lead_days, Some(5));
        assert_eq!(r.permissions, Permissions::simple_defaults());
    }

    #[tokio::test]
    async fn invalid_expiration_is_rejected() {
        let store = RecordStore::in_memory();
        let svc = service(&store, Arc::new(FixedClock::new(at(2024, 1, 1, 9))));

        assert!(matches!(
            svc.create(payload("sul@revenda.com", Some("amanhã"))).await,
            Err(AppError::InvalidDate(_))
        ));
    }

    #[tokio::test]
    async fn sweep_blocks_once_and_persists() {
        let store = RecordStore::in_memory();
        let clock = Arc::new(FixedClock::new(at(2024, 1, 1, 9)));
        let svc = service(&store, clock.clone());
        let r = svc.create(payload("sul@revenda.com", Some("2024-01-09"))).await.unwrap();

        clock.set(at(2024, 1, 10, 15));
        let first = svc.run_expiration_check().await.unwrap();
        assert!(first.blocks[0].newly_blocked);

        let stored = svc.get(&r.id).await.unwrap();
        assert!(stored.blocked);
        assert!(!stored.active);

        let second = svc.run_expiration_check().await.unwrap();
        assert!(!second.blocks[0].newly_blocked);
        assert_eq!(second.alerts.len(), 1);
    }

    // Devolve uma vez um roster antigo, como se a leitura tivesse acontecido
    // antes de a revenda ser renovada e desbloqueada.
    struct StaleRosterBackend {
        inner: MemoryBackend,
        stale: std::sync::Mutex<Option<String>>,
    }

    #[async_trait::async_trait]
    impl KeyValueBackend for StaleRosterBackend {
        async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
            if key == "db_revendas" {
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

    #[tokio::test]
    async fn sweep_does_not_block_a_reseller_renewed_after_the_read() {
        let backend = Arc::new(StaleRosterBackend {
            inner: MemoryBackend::default(),
            stale: std::sync::Mutex::new(None),
        });
        let store = RecordStore::new(backend.clone());
        let clock = Arc::new(FixedClock::new(at(2024, 1, 1, 9)));
        let svc = service(&store, clock.clone());
        let r = svc.create(payload("sul@revenda.com", Some("2024-01-09"))).await.unwrap();

        let expired = backend.inner.get("db_revendas").await.unwrap().unwrap();
        svc.manage(&r.id, ResellerAction::Block).await.unwrap();
        clock.set(at(2024, 1, 10, 15));
        svc.manage(&r.id, ResellerAction::Renew).await.unwrap();
        svc.manage(&r.id, ResellerAction::Unblock).await.unwrap();
        *backend.stale.lock().unwrap() = Some(expired);

        let report = svc.run_expiration_check().await.unwrap();
        assert!(!report.blocks[0].newly_blocked);

        let after = svc.get(&r.id).await.unwrap();
        assert_eq!(after.expiration_date, at(2024, 2, 10, 0));
        assert!(!after.blocked);
        assert!(after.active);
    }

    #[tokio::test]
    async fn renew_keeps_the_block_until_unblocked() {
        let store = RecordStore::in_memory();
        let clock = Arc::new(FixedClock::new(at(2024, 1, 1, 9)));
        let svc = service(&store, clock.clone());
        let r = svc.create(payload("sul@revenda.com", Some("2024-01-09"))).await.unwrap();

        svc.manage(&r.id, ResellerAction::Block).await.unwrap();
        clock.set(at(2024, 1, 15, 10));

        let renewed = svc.manage(&r.id, ResellerAction::Renew).await.unwrap();
        assert_eq!(renewed.expiration_date, at(2024, 2, 15, 0));
        assert!(renewed.blocked);

        let unblocked = svc.manage(&r.id, ResellerAction::Unblock).await.unwrap();
        assert!(!unblocked.blocked);
        assert!(unblocked.active);
    }

    #[tokio::test]
    async fn duplicate_email_is_refused() {
        let store = RecordStore::in_memory();
        let svc = service(&store, Arc::new(FixedClock::new(at(2024, 1, 1, 9))));
        svc.create(payload("sul@revenda.com", None)).await.unwrap();

        assert!(matches!(
            svc.create(payload("sul@revenda.com", None)).await,
            Err(AppError::EmailAlreadyExists)
        ));
    }
}
