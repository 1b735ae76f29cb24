//! Wiring between configuration, adapters and the editor.

#[cfg(feature = "cli")]
pub mod commands;

use crate::adapters::image_host::HttpImageHost;
use crate::adapters::remove_bg::RemoveBgClient;
use crate::config::AdminConfig;
use crate::core::icon_upload::IconUploader;
use crate::core::{BackgroundRemover, ImageFile};
use crate::utils::error::Result;
use std::path::Path;
use std::sync::Arc;

pub fn build_uploader(config: &AdminConfig) -> IconUploader {
    build_uploader_with(config, |name| std::env::var(name).ok())
}

/// Builds the uploader reading environment fallbacks through `env`.
pub fn build_uploader_with(
    config: &AdminConfig,
    env: impl Fn(&str) -> Option<String>,
) -> IconUploader {
    let host = Arc::new(HttpImageHost::new(&config.image_host));
    let remover = RemoveBgClient::from_config_with(&config.background_removal, env)
        .map(|client| Arc::new(client) as Arc<dyn BackgroundRemover>);

    if remover.is_some() {
        tracing::debug!("Background removal enabled for icon uploads");
    } else {
        tracing::debug!("No background removal key configured, icons are uploaded as-is");
    }
    IconUploader::new(host, remover)
}

pub async fn read_image_file(path: &Path) -> Result<ImageFile> {
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload")
        .to_string();
    Ok(ImageFile::new(name, mime_for_path(path), bytes))
}

pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}
