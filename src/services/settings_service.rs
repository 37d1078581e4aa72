// src/services/settings_service.rs

use crate::{
    common::error::AppError,
    db::SettingsRepository,
    models::settings::{Plan, SystemConfig, UpdatePlanPayload, UpdateSettingsRequest},
};

// Configuração do painel e catálogo de planos
#[derive(Clone)]
pub struct SettingsService {
    repo: SettingsRepository,
}

impl SettingsService {
    pub fn new(repo: SettingsRepository) -> Self {
        Self { repo }
    }

    pub async fn get_config(&self) -> Result<SystemConfig, AppError> {
        self.repo.get_config().await
    }

    pub async fn update_config(&self, request: UpdateSettingsRequest) -> Result<SystemConfig, AppError> {
        let mut config = self.repo.get_config().await?;

        if let Some(logo_url) = request.logo_url {
            config.logo_url = logo_url;
        }
        if let Some(name) = request.system_name {
            config.system_name = name;
        }
        if let Some(color) = request.primary_color {
            config.primary_color = color;
        }
        if let Some(color) = request.secondary_color {
            config.secondary_color = color;
        }

        self.repo.save_config(&config).await?;
        Ok(config)
    }

    pub async fn list_plans(&self) -> Result<Vec<Plan>, AppError> {
        self.repo.list_plans().await
    }

    pub async fn update_plan(&self, id: &str, payload: UpdatePlanPayload) -> Result<Plan, AppError> {
        let mut plan = self.repo.find_plan(id).await?.ok_or(AppError::PlanNotFound)?;

        if let Some(name) = payload.name {
            plan.name = name;
        }
        if let Some(price) = payload.price {
            plan.price = price;
        }
        if let Some(channels) = payload.channels {
            plan.channels = channels;
        }
        if let Some(description) = payload.description {
            plan.description = description;
        }
        if let Some(active) = payload.active {
            plan.active = active;
        }

        self.repo.save_plan(&plan).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::RecordStore;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn config_falls_back_to_defaults_and_merges_updates() {
        let service = SettingsService::new(SettingsRepository::new(RecordStore::in_memory()));
        assert_eq!(service.get_config().await.unwrap(), SystemConfig::default());

        let updated = service
            .update_config(UpdateSettingsRequest {
                logo_url: Some("https://painel.com/logo.png".into()),
                system_name: None,
                primary_color: Some("#000000".into()),
                secondary_color: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.system_name, "IPTV Manager Pro");
        assert_eq!(service.get_config().await.unwrap(), updated);
    }

    #[tokio::test]
    async fn plan_edit_changes_only_sent_fields() {
        let repo = SettingsRepository::new(RecordStore::in_memory());
        repo.seed_plans().await.unwrap();
        let service = SettingsService::new(repo);

        let plan = service
            .update_plan(
                "2",
                UpdatePlanPayload {
                    name: None,
                    price: Some(Decimal::new(5490, 2)),
                    channels: None,
                    description: None,
                    active: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(plan.name, "Premium");
        assert_eq!(plan.price, Decimal::new(5490, 2));
        assert_eq!(service.list_plans().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn unknown_plan_is_not_found() {
        let service = SettingsService::new(SettingsRepository::new(RecordStore::in_memory()));
        let payload = UpdatePlanPayload {
            name: None,
            price: None,
            channels: None,
            description: None,
            active: Some(false),
        };
        assert!(matches!(
            service.update_plan("99", payload).await,
            Err(AppError::PlanNotFound)
        ));
    }
}
