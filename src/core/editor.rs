use crate::core::hero::HeroEditor;
use crate::core::icon_upload::IconUploader;
use crate::core::materials::MaterialPanel;
use crate::core::repository::ContentRepository;
use crate::core::services::ServicePanel;
use crate::core::{DocumentStore, Notifier};
use crate::utils::error::Result;
use std::sync::Arc;

/// The three content panels over one store connection.
pub struct AdminContentEditor<S: DocumentStore, N: Notifier> {
    pub hero: HeroEditor<S, N>,
    pub services: ServicePanel<S, N>,
    pub materials: MaterialPanel<S, N>,
}

impl<S: DocumentStore, N: Notifier> AdminContentEditor<S, N> {
    pub fn new(store: S, notifier: N, uploader: IconUploader) -> Self {
        let repo = Arc::new(ContentRepository::new(store));
        let notifier = Arc::new(notifier);

        Self {
            hero: HeroEditor::new(repo.clone(), notifier.clone()),
            services: ServicePanel::new(repo.clone(), notifier.clone(), uploader),
            materials: MaterialPanel::new(repo, notifier),
        }
    }

    /// Loads all three panels. The first failing read is returned.
    pub async fn load(&mut self) -> Result<()> {
        self.hero.load().await?;
        self.services.load().await?;
        self.materials.load().await?;
        tracing::debug!(
            "Editor loaded: {} services, {} materials",
            self.services.items().len(),
            self.materials.items().len()
        );
        Ok(())
    }
}
