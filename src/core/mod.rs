pub mod editor;
pub mod hero;
pub mod icon_upload;
pub mod materials;
pub mod modal;
pub mod repository;
pub mod services;

pub use crate::domain::model::{
    Entry, HeroContent, Material, Service, ServiceIcon, HERO_COLLECTION, HERO_DOCUMENT_ID,
    MATERIALS_COLLECTION, SERVICES_COLLECTION,
};
pub use crate::domain::ports::{
    BackgroundRemover, DocumentStore, Fields, ImageFile, ImageHost, Notifier,
};
pub use crate::utils::error::{AdminError, Result};

/// Logs a failed remote call and raises the single user-facing alert for it.
pub(crate) fn report_failure<N: Notifier + ?Sized>(
    notifier: &N,
    alert: &str,
    error: AdminError,
) -> AdminError {
    tracing::error!("❌ {}: {}", alert, error);
    notifier.alert(alert);
    error
}
