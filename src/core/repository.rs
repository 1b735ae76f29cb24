use crate::core::{
    DocumentStore, Entry, Fields, HeroContent, Material, Service, HERO_COLLECTION,
    HERO_DOCUMENT_ID, MATERIALS_COLLECTION, SERVICES_COLLECTION,
};
use crate::domain::model::{sort_by_order, Document, Ordered};
use crate::utils::error::{AdminError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Typed access to the three content collections over one store connection.
pub struct ContentRepository<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> ContentRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn hero(&self) -> Result<HeroContent> {
        match self.store.get(HERO_COLLECTION, HERO_DOCUMENT_ID).await? {
            Some(doc) => decode(doc).map(|entry| entry.value),
            None => {
                tracing::debug!("No hero document yet, using empty content");
                Ok(HeroContent::default())
            }
        }
    }

    pub async fn save_hero(&self, hero: &HeroContent) -> Result<()> {
        self.store
            .set(HERO_COLLECTION, HERO_DOCUMENT_ID, encode(hero)?)
            .await
    }

    pub async fn services(&self) -> Result<Vec<Entry<Service>>> {
        self.list_ordered(SERVICES_COLLECTION).await
    }

    pub async fn create_service(&self, service: &Service) -> Result<String> {
        self.store.add(SERVICES_COLLECTION, encode(service)?).await
    }

    pub async fn update_service(&self, id: &str, service: &Service) -> Result<()> {
        self.store
            .update(SERVICES_COLLECTION, id, encode(service)?)
            .await
    }

    pub async fn delete_service(&self, id: &str) -> Result<()> {
        self.store.delete(SERVICES_COLLECTION, id).await
    }

    pub async fn materials(&self) -> Result<Vec<Entry<Material>>> {
        self.list_ordered(MATERIALS_COLLECTION).await
    }

    pub async fn create_material(&self, material: &Material) -> Result<String> {
        self.store.add(MATERIALS_COLLECTION, encode(material)?).await
    }

    pub async fn update_material(&self, id: &str, material: &Material) -> Result<()> {
        self.store
            .update(MATERIALS_COLLECTION, id, encode(material)?)
            .await
    }

    pub async fn delete_material(&self, id: &str) -> Result<()> {
        self.store.delete(MATERIALS_COLLECTION, id).await
    }

    async fn list_ordered<T>(&self, collection: &str) -> Result<Vec<Entry<T>>>
    where
        T: DeserializeOwned + Ordered,
    {
        let documents = self.store.list(collection).await?;
        let mut entries = documents
            .into_iter()
            .map(decode)
            .collect::<Result<Vec<Entry<T>>>>()?;
        sort_by_order(&mut entries);
        tracing::debug!("Loaded {} documents from '{}'", entries.len(), collection);
        Ok(entries)
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Fields> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(AdminError::InvalidStateError {
            message: format!("expected an object to store, got {}", other),
        }),
    }
}

fn decode<T: DeserializeOwned>(doc: Document) -> Result<Entry<T>> {
    let object: serde_json::Map<String, serde_json::Value> = doc.data.into_iter().collect();
    let value = serde_json::from_value(serde_json::Value::Object(object))?;
    Ok(Entry { id: doc.id, value })
}
