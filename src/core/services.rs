use crate::core::icon_upload::IconUploader;
use crate::core::modal::{FormMode, Modal};
use crate::core::repository::ContentRepository;
use crate::core::{report_failure, DocumentStore, Entry, ImageFile, Notifier, Service, ServiceIcon};
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::require_field;
use std::sync::Arc;

pub const SERVICE_SAVE_FAILED: &str = "Failed to save service";
pub const SERVICE_DELETE_FAILED: &str = "Failed to delete service";
pub const SERVICE_DELETE_CONFIRM: &str = "Are you sure you want to delete this service?";
pub const ICON_UPLOAD_FAILED: &str = "Failed to upload icon";
pub const ICON_NOT_AN_IMAGE: &str = "Please upload an image file";

pub struct IconOption {
    pub value: ServiceIcon,
    pub label: &'static str,
}

pub fn icon_options() -> Vec<IconOption> {
    ServiceIcon::ALL
        .iter()
        .map(|icon| IconOption {
            value: *icon,
            label: icon.label(),
        })
        .collect()
}

/// Service list plus its create/edit dialog.
pub struct ServicePanel<S: DocumentStore, N: Notifier> {
    repo: Arc<ContentRepository<S>>,
    notifier: Arc<N>,
    uploader: IconUploader,
    items: Vec<Entry<Service>>,
    loading: bool,
    modal: Modal<Service>,
}

impl<S: DocumentStore, N: Notifier> ServicePanel<S, N> {
    pub fn new(repo: Arc<ContentRepository<S>>, notifier: Arc<N>, uploader: IconUploader) -> Self {
        Self {
            repo,
            notifier,
            uploader,
            items: Vec::new(),
            loading: true,
            modal: Modal::Closed,
        }
    }

    pub async fn load(&mut self) -> Result<()> {
        self.items = self.repo.services().await?;
        self.loading = false;
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn items(&self) -> &[Entry<Service>] {
        &self.items
    }

    pub fn modal(&self) -> &Modal<Service> {
        &self.modal
    }

    pub fn form_mut(&mut self) -> Option<&mut Service> {
        self.modal.form_mut()
    }

    pub fn open_create(&mut self) {
        let next_index = self.items.len() as i64 + 1;
        self.modal.open_create(Service::blank(next_index));
    }

    pub fn open_edit(&mut self, id: &str) -> Result<()> {
        let entry = self
            .items
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| AdminError::NotFoundError {
                path: format!("services/{}", id),
            })?;
        let form = entry.value.clone();
        self.modal.open_edit(id, form);
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.modal.close();
    }

    pub fn clear_icon_photo(&mut self) {
        if let Some(form) = self.modal.form_mut() {
            form.icon_photo_url.clear();
        }
    }

    /// Runs the icon upload pipeline and stores the final link in the open form.
    pub async fn upload_icon(&mut self, file: ImageFile) -> Result<String> {
        if !self.modal.is_open() {
            return Err(AdminError::InvalidStateError {
                message: "service form is not open".to_string(),
            });
        }

        let link = self.upload_icon_file(&file).await?;
        if let Some(form) = self.modal.form_mut() {
            form.icon_photo_url = link.clone();
        }
        Ok(link)
    }

    /// Runs the icon upload pipeline without touching the form.
    pub async fn upload_icon_file(&self, file: &ImageFile) -> Result<String> {
        if !file.is_image() {
            self.notifier.alert(ICON_NOT_AN_IMAGE);
            return Err(AdminError::UnsupportedMediaError {
                mime: file.mime_type.clone(),
            });
        }

        match self.uploader.upload(file).await {
            Ok(link) => Ok(link),
            Err(e) => Err(report_failure(self.notifier.as_ref(), ICON_UPLOAD_FAILED, e)),
        }
    }

    /// Submits the open form. Returns the id of the written document.
    pub async fn submit(&mut self) -> Result<String> {
        let (mode, form) = match &self.modal {
            Modal::Open { mode, form } => (mode.clone(), form.clone()),
            Modal::Closed => {
                return Err(AdminError::InvalidStateError {
                    message: "service form is not open".to_string(),
                })
            }
        };

        if let Err(e) = validate_service(&form) {
            self.notifier.alert(&e.user_friendly_message());
            return Err(e);
        }

        let written = match &mode {
            FormMode::Create => self.repo.create_service(&form).await,
            FormMode::Edit { id } => self
                .repo
                .update_service(id, &form)
                .await
                .map(|()| id.clone()),
        };

        match written {
            Ok(id) => {
                tracing::info!("✅ Service '{}' saved ({})", form.title, id);
                self.modal.close();
                self.reload().await;
                Ok(id)
            }
            Err(e) => Err(report_failure(self.notifier.as_ref(), SERVICE_SAVE_FAILED, e)),
        }
    }

    /// Deletes after confirmation. `Ok(false)` when the user declines.
    pub async fn delete(&mut self, id: &str) -> Result<bool> {
        if !self.notifier.confirm(SERVICE_DELETE_CONFIRM) {
            tracing::debug!("Service {} deletion declined", id);
            return Ok(false);
        }

        match self.repo.delete_service(id).await {
            Ok(()) => {
                tracing::info!("🗑️ Service {} deleted", id);
                self.reload().await;
                Ok(true)
            }
            Err(e) => Err(report_failure(self.notifier.as_ref(), SERVICE_DELETE_FAILED, e)),
        }
    }

    async fn reload(&mut self) {
        if let Err(e) = self.load().await {
            tracing::warn!("Could not refresh services after write: {}", e);
        }
    }
}

fn validate_service(service: &Service) -> Result<()> {
    require_field("Title", &service.title)?;
    require_field("Description", &service.description)?;
    require_field("Image URL", &service.image_url)?;
    Ok(())
}
