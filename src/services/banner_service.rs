// src/services/banner_service.rs

use std::sync::Arc;
use uuid::Uuid;

use crate::{
    common::{clock::Clock, error::AppError},
    db::{BannerRepository, SettingsRepository},
    models::banner::{Banner, CreateBannerPayload},
    services::permissions::AccessContext,
};

#[derive(Clone)]
pub struct BannerService {
    repo: BannerRepository,
    settings_repo: SettingsRepository,
    clock: Arc<dyn Clock>,
}

impl BannerService {
    pub fn new(repo: BannerRepository, settings_repo: SettingsRepository, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            settings_repo,
            clock,
        }
    }

    pub async fn list(&self, ctx: &AccessContext) -> Result<Vec<Banner>, AppError> {
        Ok(self
            .repo
            .list_all()
            .await?
            .into_iter()
            .filter(|b| ctx.can_see(&b.owner_id))
            .collect())
    }

    /// Guarda a logo do sistema e a da revenda (com a posição) no momento da criação.
    pub async fn create(&self, ctx: &AccessContext, payload: CreateBannerPayload) -> Result<Banner, AppError> {
        let config = self.settings_repo.get_config().await?;
        let own = ctx.own_reseller();

        let banner = Banner {
            id: Uuid::new_v4().to_string(),
            category: payload.category,
            image_url: payload.image_url,
            logo_url: config.logo_url,
            owner_id: ctx.principal.id.clone(),
            created_at: self.clock.now(),
            title: payload.title,
            synopsis: payload.synopsis,
            event_date: payload.event_date,
            custom_logo_url: own.and_then(|r| r.custom_logo_url.clone()),
            logo_position: own.map(|r| r.logo_position).unwrap_or_default(),
        };

        self.repo.create(&banner).await?;
        Ok(banner)
    }

    pub async fn delete(&self, ctx: &AccessContext, id: &str) -> Result<(), AppError> {
        let banner = self
            .repo
            .find_by_id(id)
            .await?
            .filter(|b| ctx.can_see(&b.owner_id))
            .ok_or(AppError::BannerNotFound)?;
        self.repo.delete(&banner.id).await
    }
}
