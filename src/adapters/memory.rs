use crate::core::{DocumentStore, Fields};
use crate::domain::model::Document;
use crate::utils::error::{AdminError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Set {
        collection: String,
        id: String,
        data: Fields,
    },
    Add {
        collection: String,
        id: String,
        data: Fields,
    },
    Update {
        collection: String,
        id: String,
        data: Fields,
    },
    Delete {
        collection: String,
        id: String,
    },
}

/// Process-local document store with the same write semantics as the
/// remote one. Every successful write is appended to a log.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<Mutex<HashMap<String, Vec<Document>>>>,
    writes: Arc<Mutex<Vec<WriteOp>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a document without recording a write.
    pub async fn seed(&self, collection: &str, id: &str, value: serde_json::Value) {
        let data = match value {
            serde_json::Value::Object(map) => map.into_iter().collect(),
            _ => HashMap::new(),
        };
        let mut collections = self.collections.lock().await;
        upsert(
            collections.entry(collection.to_string()).or_default(),
            Document {
                id: id.to_string(),
                data,
            },
        );
    }

    pub async fn writes(&self) -> Vec<WriteOp> {
        self.writes.lock().await.clone()
    }

    /// Makes every following write fail as if the remote rejected it.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self, collection: &str, id: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AdminError::StoreError {
                status: 503,
                path: format!("{}/{}", collection, id),
                message: "UNAVAILABLE".to_string(),
            });
        }
        Ok(())
    }

    async fn record(&self, op: WriteOp) {
        self.writes.lock().await.push(op);
    }
}

fn upsert(documents: &mut Vec<Document>, doc: Document) {
    match documents.iter_mut().find(|existing| existing.id == doc.id) {
        Some(existing) => *existing = doc,
        None => documents.push(doc),
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id))
            .cloned())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let collections = self.collections.lock().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn set(&self, collection: &str, id: &str, data: Fields) -> Result<()> {
        self.check_writable(collection, id)?;
        {
            let mut collections = self.collections.lock().await;
            upsert(
                collections.entry(collection.to_string()).or_default(),
                Document {
                    id: id.to_string(),
                    data: data.clone(),
                },
            );
        }
        self.record(WriteOp::Set {
            collection: collection.to_string(),
            id: id.to_string(),
            data,
        })
        .await;
        Ok(())
    }

    async fn add(&self, collection: &str, data: Fields) -> Result<String> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.check_writable(collection, &id)?;
        {
            let mut collections = self.collections.lock().await;
            collections
                .entry(collection.to_string())
                .or_default()
                .push(Document {
                    id: id.clone(),
                    data: data.clone(),
                });
        }
        self.record(WriteOp::Add {
            collection: collection.to_string(),
            id: id.clone(),
            data,
        })
        .await;
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, data: Fields) -> Result<()> {
        self.check_writable(collection, id)?;
        {
            let mut collections = self.collections.lock().await;
            let doc = collections
                .get_mut(collection)
                .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
                .ok_or_else(|| AdminError::NotFoundError {
                    path: format!("{}/{}", collection, id),
                })?;
            for (key, value) in &data {
                doc.data.insert(key.clone(), value.clone());
            }
        }
        self.record(WriteOp::Update {
            collection: collection.to_string(),
            id: id.to_string(),
            data,
        })
        .await;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.check_writable(collection, id)?;
        {
            let mut collections = self.collections.lock().await;
            if let Some(docs) = collections.get_mut(collection) {
                docs.retain(|doc| doc.id != id);
            }
        }
        self.record(WriteOp::Delete {
            collection: collection.to_string(),
            id: id.to_string(),
        })
        .await;
        Ok(())
    }
}
