use crate::config::BackgroundRemovalConfig;
use crate::core::BackgroundRemover;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::Client;

pub const DEFAULT_REMOVE_BG_ENDPOINT: &str = "https://api.remove.bg/v1.0/removebg";
pub const DEFAULT_SIZE: &str = "auto";

pub struct RemoveBgClient {
    client: Client,
    endpoint: String,
    api_key: String,
    size: String,
}

impl RemoveBgClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: DEFAULT_REMOVE_BG_ENDPOINT.to_string(),
            api_key: api_key.into(),
            size: DEFAULT_SIZE.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// `None` when no API key is configured, which disables the feature.
    pub fn from_config(config: &BackgroundRemovalConfig) -> Option<Self> {
        Self::from_config_with(config, |name| std::env::var(name).ok())
    }

    pub fn from_config_with(
        config: &BackgroundRemovalConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Option<Self> {
        let api_key = config.api_key_with(env)?;
        let mut client = Self::new(api_key);
        if let Some(endpoint) = &config.endpoint {
            client = client.with_endpoint(endpoint.clone());
        }
        if let Some(size) = &config.size {
            client.size = size.clone();
        }
        Some(client)
    }
}

#[async_trait]
impl BackgroundRemover for RemoveBgClient {
    async fn remove_background(&self, image_url: &str) -> Result<Option<Vec<u8>>> {
        let form = Form::new()
            .text("image_url", image_url.to_string())
            .text("size", self.size.clone());

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Api-Key", &self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Background removal returned {}", status);
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        tracing::debug!("Background removal returned {} bytes", bytes.len());
        Ok(Some(bytes.to_vec()))
    }
}
