use crate::core::modal::{FormMode, Modal};
use crate::core::repository::ContentRepository;
use crate::core::{report_failure, DocumentStore, Entry, Material, Notifier};
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::require_field;
use std::sync::Arc;

pub const MATERIAL_SAVE_FAILED: &str = "Failed to save material";
pub const MATERIAL_DELETE_FAILED: &str = "Failed to delete material";
pub const MATERIAL_DELETE_CONFIRM: &str = "Are you sure you want to delete this material?";

pub struct MaterialPanel<S: DocumentStore, N: Notifier> {
    repo: Arc<ContentRepository<S>>,
    notifier: Arc<N>,
    items: Vec<Entry<Material>>,
    loading: bool,
    modal: Modal<Material>,
}

impl<S: DocumentStore, N: Notifier> MaterialPanel<S, N> {
    pub fn new(repo: Arc<ContentRepository<S>>, notifier: Arc<N>) -> Self {
        Self {
            repo,
            notifier,
            items: Vec::new(),
            loading: true,
            modal: Modal::Closed,
        }
    }

    pub async fn load(&mut self) -> Result<()> {
        self.items = self.repo.materials().await?;
        self.loading = false;
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn items(&self) -> &[Entry<Material>] {
        &self.items
    }

    pub fn modal(&self) -> &Modal<Material> {
        &self.modal
    }

    pub fn form_mut(&mut self) -> Option<&mut Material> {
        self.modal.form_mut()
    }

    pub fn open_create(&mut self) {
        let next_index = self.items.len() as i64 + 1;
        self.modal.open_create(Material::blank(next_index));
    }

    pub fn open_edit(&mut self, id: &str) -> Result<()> {
        let entry = self
            .items
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| AdminError::NotFoundError {
                path: format!("materials/{}", id),
            })?;
        let form = entry.value.clone();
        self.modal.open_edit(id, form);
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.modal.close();
    }

    pub async fn submit(&mut self) -> Result<String> {
        let (mode, form) = match &self.modal {
            Modal::Open { mode, form } => (mode.clone(), form.clone()),
            Modal::Closed => {
                return Err(AdminError::InvalidStateError {
                    message: "material form is not open".to_string(),
                })
            }
        };

        if let Err(e) = require_field("Name", &form.name) {
            self.notifier.alert(&e.user_friendly_message());
            return Err(e);
        }

        let written = match &mode {
            FormMode::Create => self.repo.create_material(&form).await,
            FormMode::Edit { id } => self
                .repo
                .update_material(id, &form)
                .await
                .map(|()| id.clone()),
        };

        match written {
            Ok(id) => {
                tracing::info!("✅ Material '{}' saved ({})", form.name, id);
                self.modal.close();
                self.reload().await;
                Ok(id)
            }
            Err(e) => Err(report_failure(self.notifier.as_ref(), MATERIAL_SAVE_FAILED, e)),
        }
    }

    pub async fn delete(&mut self, id: &str) -> Result<bool> {
        if !self.notifier.confirm(MATERIAL_DELETE_CONFIRM) {
            return Ok(false);
        }

        match self.repo.delete_material(id).await {
            Ok(()) => {
                tracing::info!("🗑️ Material {} deleted", id);
                self.reload().await;
                Ok(true)
            }
            Err(e) => Err(report_failure(self.notifier.as_ref(), MATERIAL_DELETE_FAILED, e)),
        }
    }

    async fn reload(&mut self) {
        if let Err(e) = self.load().await {
            tracing::warn!("Could not refresh materials after write: {}", e);
        }
    }
}
