// src/db/settings_repo.rs

use crate::{
    common::error::AppError,
    db::store::RecordStore,
    models::settings::{Plan, SystemConfig},
};

const CONFIG_COLLECTION: &str = "config_sistema";
const PLAN_COLLECTION: &str = "planos";

// Configuração global do painel + catálogo de planos
#[derive(Clone)]
pub struct SettingsRepository {
    store: RecordStore,
}

impl SettingsRepository {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Sem nada gravado, vale a configuração padrão.
    pub async fn get_config(&self) -> Result<SystemConfig, AppError> {
        let configs: Vec<SystemConfig> = self.store.load_all(CONFIG_COLLECTION).await?;
        Ok(configs.into_iter().next().unwrap_or_default())
    }

    // A coleção guarda sempre um único registro
    pub async fn save_config(&self, config: &SystemConfig) -> Result<(), AppError> {
        self.store
            .replace_all(CONFIG_COLLECTION, std::slice::from_ref(config))
            .await
    }

    pub async fn list_plans(&self) -> Result<Vec<Plan>, AppError> {
        self.store.load_all(PLAN_COLLECTION).await
    }

    pub async fn find_plan(&self, id: &str) -> Result<Option<Plan>, AppError> {
        self.store.find_by_id(PLAN_COLLECTION, id).await
    }

    pub async fn save_plan(&self, plan: &Plan) -> Result<Plan, AppError> {
        self.store
            .update(PLAN_COLLECTION, &plan.id, &serde_json::to_value(plan)?)
            .await?
            .ok_or(AppError::PlanNotFound)
    }

    pub async fn seed_plans(&self) -> Result<bool, AppError> {
        self.store
            .seed_if_empty(PLAN_COLLECTION, &Plan::initial_catalog())
            .await
    }
}
