use crate::core::repository::ContentRepository;
use crate::core::{report_failure, DocumentStore, HeroContent, Notifier};
use crate::utils::error::{AdminError, Result};
use std::sync::Arc;

pub const HERO_SAVE_FAILED: &str = "Failed to update hero content";

/// Inline editor for the singleton hero document.
pub struct HeroEditor<S: DocumentStore, N: Notifier> {
    repo: Arc<ContentRepository<S>>,
    notifier: Arc<N>,
    content: HeroContent,
    draft: Option<HeroContent>,
    loading: bool,
}

impl<S: DocumentStore, N: Notifier> HeroEditor<S, N> {
    pub fn new(repo: Arc<ContentRepository<S>>, notifier: Arc<N>) -> Self {
        Self {
            repo,
            notifier,
            content: HeroContent::default(),
            draft: None,
            loading: true,
        }
    }

    pub async fn load(&mut self) -> Result<()> {
        let content = self.repo.hero().await?;
        self.apply_loaded(content);
        Ok(())
    }

    /// New content from the store. An in-progress draft is left alone.
    pub fn apply_loaded(&mut self, content: HeroContent) {
        self.content = content;
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn content(&self) -> &HeroContent {
        &self.content
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&HeroContent> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut HeroContent> {
        self.draft.as_mut()
    }

    pub fn begin_edit(&mut self) {
        self.draft = Some(self.content.clone());
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }

    pub async fn save(&mut self) -> Result<()> {
        let Some(draft) = self.draft.clone() else {
            return Err(AdminError::InvalidStateError {
                message: "hero content is not being edited".to_string(),
            });
        };

        match self.repo.save_hero(&draft).await {
            Ok(()) => {
                tracing::info!("✅ Hero content updated");
                self.content = draft;
                self.draft = None;
                Ok(())
            }
            Err(e) => Err(report_failure(self.notifier.as_ref(), HERO_SAVE_FAILED, e)),
        }
    }
}
