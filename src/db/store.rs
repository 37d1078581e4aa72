// src/db/store.rs
//
// Emulação de "banco" por chave: cada coleção é um array JSON guardado
// sob a chave `db_<coleção>`, exatamente como o painel fazia no navegador.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::{Mutex, RwLock};

use crate::common::error::AppError;

/// O backend cru: chave -> texto.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    async fn remove(&self, key: &str) -> Result<(), AppError>;
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl KeyValueBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Um arquivo `<chave>.json` por chave dentro de `base_path`.
#[derive(Debug, Clone)]
pub struct FileBackend {
    base_path: PathBuf,
}

impl FileBackend {
    /// Cria o diretório se ainda não existir.
    pub fn new(base_path: PathBuf) -> Result<Self, AppError> {
        if !base_path.exists() {
            std::fs::create_dir_all(&base_path)?;
        }
        Ok(Self { base_path })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.json"))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!(".{key}.json.tmp"))
    }
}

#[async_trait]
impl KeyValueBackend for FileBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path).await?))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        // Escreve no temporário e renomeia (atômico na maioria dos FS)
        let temp_path = self.temp_path(key);
        fs::write(&temp_path, value).await?;
        fs::rename(&temp_path, self.key_path(key)).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path).await?;
        }
        Ok(())
    }
}

/// Acesso tipado às coleções. Clonar é barato (tudo atrás de `Arc`).
///
/// Toda escrita é um ciclo ler-alterar-gravar serializado por um mutex, então
/// a varredura de vencimentos e os handlers nunca intercalam gravações.
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn KeyValueBackend>,
    write_lock: Arc<Mutex<()>>,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self {
            backend,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::default()))
    }

    pub fn file(base_path: PathBuf) -> Result<Self, AppError> {
        Ok(Self::new(Arc::new(FileBackend::new(base_path)?)))
    }

    fn collection_key(collection: &str) -> String {
        format!("db_{collection}")
    }

    async fn read_values(&self, collection: &str) -> Result<Vec<Value>, AppError> {
        match self.backend.get(&Self::collection_key(collection)).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn write_values(&self, collection: &str, values: &[Value]) -> Result<(), AppError> {
        let raw = serde_json::to_string(values)?;
        self.backend
            .set(&Self::collection_key(collection), &raw)
            .await?;
        tracing::debug!("💾 Coleção '{}' gravada ({} registros)", collection, values.len());
        Ok(())
    }

    fn id_of(value: &Value) -> Option<&str> {
        value.get("id").and_then(Value::as_str)
    }

    pub async fn load_all<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, AppError> {
        self.read_values(collection)
            .await?
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(AppError::from))
            .collect()
    }

    pub async fn find_by_id<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, AppError> {
        let found = self
            .read_values(collection)
            .await?
            .into_iter()
            .find(|value| Self::id_of(value) == Some(id));

        match found {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Acrescenta no fim da coleção.
    pub async fn insert<T: Serialize>(&self, collection: &str, record: &T) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.read_values(collection).await?;
        values.push(serde_json::to_value(record)?);
        self.write_values(collection, &values).await
    }

    /// Mescla os campos de `patch` no registro `id` (`{ ...item, ...patch }`).
    ///
    /// O resultado precisa continuar sendo um `T` válido; senão nada é gravado.
    /// Retorna `None` quando o id não existe.
    pub async fn update<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
        patch: &Value,
    ) -> Result<Option<T>, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.read_values(collection).await?;

        let Some(item) = values.iter_mut().find(|value| Self::id_of(value) == Some(id)) else {
            return Ok(None);
        };

        let mut merged = item.clone();
        if let (Some(target), Some(fields)) = (merged.as_object_mut(), patch.as_object()) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }

        let record: T = serde_json::from_value(merged.clone())?;
        *item = merged;
        self.write_values(collection, &values).await?;

        Ok(Some(record))
    }

    /// Como `update`, mas só grava se `condition` aceitar o registro atual.
    ///
    /// A condição é avaliada sob o mesmo lock da escrita, sobre o que está
    /// gravado agora. Retorna `None` quando o id não existe ou a condição recusa.
    pub async fn update_if<T, F>(
        &self,
        collection: &str,
        id: &str,
        patch: &Value,
        condition: F,
    ) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned,
        F: FnOnce(&T) -> bool,
    {
        let _guard = self.write_lock.lock().await;
        let mut values = self.read_values(collection).await?;

        let Some(item) = values.iter_mut().find(|value| Self::id_of(value) == Some(id)) else {
            return Ok(None);
        };

        let current: T = serde_json::from_value(item.clone())?;
        if !condition(&current) {
            return Ok(None);
        }

        let mut merged = item.clone();
        if let (Some(target), Some(fields)) = (merged.as_object_mut(), patch.as_object()) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }

        let record: T = serde_json::from_value(merged.clone())?;
        *item = merged;
        self.write_values(collection, &values).await?;

        Ok(Some(record))
    }

    /// Retorna `false` quando o id não existia.
    pub async fn delete(&self, collection: &str, id: &str) -> Result<bool, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.read_values(collection).await?;
        let before = values.len();
        values.retain(|value| Self::id_of(value) != Some(id));

        if values.len() == before {
            return Ok(false);
        }
        self.write_values(collection, &values).await?;
        Ok(true)
    }

    /// Remove todos os registros cujo `field` (texto) é igual a `expected`.
    pub async fn delete_where(
        &self,
        collection: &str,
        field: &str,
        expected: &str,
    ) -> Result<usize, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.read_values(collection).await?;
        let before = values.len();
        values.retain(|value| value.get(field).and_then(Value::as_str) != Some(expected));

        let removed = before - values.len();
        if removed > 0 {
            self.write_values(collection, &values).await?;
        }
        Ok(removed)
    }

    pub async fn replace_all<T: Serialize>(&self, collection: &str, records: &[T]) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        let values = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.write_values(collection, &values).await
    }

    /// Grava a coleção apenas se ela ainda estiver vazia. Retorna se gravou.
    pub async fn seed_if_empty<T: Serialize>(&self, collection: &str, records: &[T]) -> Result<bool, AppError> {
        let _guard = self.write_lock.lock().await;
        if !self.read_values(collection).await?.is_empty() {
            return Ok(false);
        }
        let values = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.write_values(collection, &values).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        name: String,
        #[serde(default)]
        owner: String,
        count: u32,
    }

    fn item(id: &str, owner: &str) -> Item {
        Item {
            id: id.to_string(),
            name: format!("item {id}"),
            owner: owner.to_string(),
            count: 1,
        }
    }

    #[tokio::test]
    async fn missing_collection_reads_as_empty() {
        let store = RecordStore::in_memory();
        let items: Vec<Item> = store.load_all("itens").await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn update_merges_only_given_fields() {
        let store = RecordStore::in_memory();
        store.insert("itens", &item("1", "a")).await.unwrap();

        let updated: Item = store
            .update("itens", "1", &json!({ "count": 7 }))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.count, 7);
        assert_eq!(updated.name, "item 1");
    }

    #[tokio::test]
    async fn update_rejects_patch_that_breaks_the_record() {
        let store = RecordStore::in_memory();
        store.insert("itens", &item("1", "a")).await.unwrap();

        let result = store
            .update::<Item>("itens", "1", &json!({ "count": "muitos" }))
            .await;
        assert!(matches!(result, Err(AppError::SerializationError(_))));

        let stored: Item = store.find_by_id("itens", "1").await.unwrap().unwrap();
        assert_eq!(stored.count, 1);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_none() {
        let store = RecordStore::in_memory();
        let result = store
            .update::<Item>("itens", "nada", &json!({ "count": 2 }))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn update_if_checks_the_stored_record() {
        let store = RecordStore::in_memory();
        store.insert("itens", &item("1", "a")).await.unwrap();

        let refused = store
            .update_if::<Item, _>("itens", "1", &json!({ "count": 9 }), |current| current.owner == "b")
            .await
            .unwrap();
        assert!(refused.is_none());
        let stored: Item = store.find_by_id("itens", "1").await.unwrap().unwrap();
        assert_eq!(stored.count, 1);

        let applied = store
            .update_if::<Item, _>("itens", "1", &json!({ "count": 9 }), |current| current.owner == "a")
            .await
            .unwrap();
        assert_eq!(applied.map(|i| i.count), Some(9));
    }

    #[tokio::test]
    async fn delete_where_cascades_by_field() {
        let store = RecordStore::in_memory();
        for (id, owner) in [("1", "a"), ("2", "b"), ("3", "a")] {
            store.insert("itens", &item(id, owner)).await.unwrap();
        }

        assert_eq!(store.delete_where("itens", "owner", "a").await.unwrap(), 2);
        let left: Vec<Item> = store.load_all("itens").await.unwrap();
        assert_eq!(left, vec![item("2", "b")]);
    }

    #[tokio::test]
    async fn seed_only_touches_empty_collections() {
        let store = RecordStore::in_memory();
        assert!(store.seed_if_empty("itens", &[item("1", "a")]).await.unwrap());
        assert!(!store.seed_if_empty("itens", &[item("2", "a")]).await.unwrap());
        assert_eq!(store.load_all::<Item>("itens").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn file_backend_survives_reopen() {
        let dir = TempDir::new().unwrap();

        let store = RecordStore::file(dir.path().to_path_buf()).unwrap();
        store.insert("itens", &item("1", "a")).await.unwrap();
        assert!(dir.path().join("db_itens.json").exists());

        let reopened = RecordStore::file(dir.path().to_path_buf()).unwrap();
        let found: Option<Item> = reopened.find_by_id("itens", "1").await.unwrap();
        assert_eq!(found, Some(item("1", "a")));
    }

    #[tokio::test]
    async fn corrupt_collection_is_an_error_not_an_empty_list() {
        let backend = Arc::new(MemoryBackend::default());
        backend.set("db_itens", "{ nao é json").await.unwrap();
        let store = RecordStore::new(backend);

        assert!(store.load_all::<Item>("itens").await.is_err());
    }
}
