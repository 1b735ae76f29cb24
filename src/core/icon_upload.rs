use crate::core::{BackgroundRemover, ImageFile, ImageHost};
use crate::utils::error::{AdminError, Result};
use std::sync::Arc;

pub const NO_BACKGROUND_FILENAME: &str = "icon-no-bg.png";
pub const NO_BACKGROUND_MIME: &str = "image/png";

/// Upload → optional background removal → re-upload.
///
/// Every step runs strictly after the previous one, without retries. When
/// the remover answers with a non-success status the first link is kept. A
/// failed re-upload fails the whole operation and leaves the first upload
/// where it is.
#[derive(Clone)]
pub struct IconUploader {
    host: Arc<dyn ImageHost>,
    remover: Option<Arc<dyn BackgroundRemover>>,
}

impl IconUploader {
    pub fn new(host: Arc<dyn ImageHost>, remover: Option<Arc<dyn BackgroundRemover>>) -> Self {
        Self { host, remover }
    }

    pub fn removes_background(&self) -> bool {
        self.remover.is_some()
    }

    pub async fn upload(&self, file: &ImageFile) -> Result<String> {
        if !file.is_image() {
            return Err(AdminError::UnsupportedMediaError {
                mime: file.mime_type.clone(),
            });
        }

        tracing::debug!("📤 Uploading icon '{}' ({} bytes)", file.name, file.bytes.len());
        let direct_link = self.host.upload(file).await?;
        tracing::debug!("📤 Icon hosted at {}", direct_link);

        let Some(remover) = &self.remover else {
            return Ok(direct_link);
        };

        match remover.remove_background(&direct_link).await? {
            Some(bytes) => {
                let cleaned = ImageFile::new(NO_BACKGROUND_FILENAME, NO_BACKGROUND_MIME, bytes);
                let cleaned_link = self.host.upload(&cleaned).await?;
                tracing::info!("✂️ Background removed, icon re-hosted at {}", cleaned_link);
                Ok(cleaned_link)
            }
            None => {
                tracing::warn!("Background removal failed, keeping original icon {}", direct_link);
                Ok(direct_link)
            }
        }
    }
}
