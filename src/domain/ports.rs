use crate::domain::model::Document;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

pub type Fields = HashMap<String, serde_json::Value>;

/// Per-document CRUD over a managed document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// `Ok(None)` when the document does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;
    async fn list(&self, collection: &str) -> Result<Vec<Document>>;
    /// Whole-document write; replaces every existing field.
    async fn set(&self, collection: &str, id: &str, data: Fields) -> Result<()>;
    /// Insert with a store-assigned id, returned on success.
    async fn add(&self, collection: &str, data: Fields) -> Result<String>;
    /// Partial write of the given fields; fails when the document is missing.
    async fn update(&self, collection: &str, id: &str, data: Fields) -> Result<()>;
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Image hosting upload: file in, direct link out.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, file: &ImageFile) -> Result<String>;
}

/// Background removal for an already hosted image.
#[async_trait]
pub trait BackgroundRemover: Send + Sync {
    /// `Ok(Some(bytes))` on HTTP success, `Ok(None)` on any other status.
    async fn remove_background(&self, image_url: &str) -> Result<Option<Vec<u8>>>;
}

/// Blocking user notifications.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn alert(&self, message: &str) {
        (**self).alert(message)
    }

    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }
}
