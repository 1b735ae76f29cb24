use crate::config::ImageHostConfig;
use crate::core::{ImageFile, ImageHost};
use crate::utils::error::{AdminError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

/// Multipart upload to an image hosting API that answers with JSON.
pub struct HttpImageHost {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    field_name: String,
    link_pointer: String,
}

impl HttpImageHost {
    pub fn new(config: &ImageHostConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key().map(str::to_string),
            field_name: config.field_name().to_string(),
            link_pointer: config.link_pointer().to_string(),
        }
    }
}

#[async_trait]
impl ImageHost for HttpImageHost {
    async fn upload(&self, file: &ImageFile) -> Result<String> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)?;
        let form = Form::new().part(self.field_name.clone(), part);

        let mut request = self.client.post(&self.endpoint).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }

        tracing::debug!("Uploading '{}' to {}", file.name, self.endpoint);
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdminError::ImageHostError {
                message: format!("upload failed with status {}: {}", status, body),
            });
        }

        let body: serde_json::Value = response.json().await?;
        body.pointer(&self.link_pointer)
            .and_then(|link| link.as_str())
            .filter(|link| !link.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AdminError::ImageHostError {
                message: format!("response has no link at '{}'", self.link_pointer),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn host(server: &MockServer) -> HttpImageHost {
        HttpImageHost::new(&ImageHostConfig {
            endpoint: server.url("/1/upload"),
            api_key: Some("host-key".to_string()),
            field_name: None,
            link_pointer: None,
        })
    }

    #[tokio::test]
    async fn test_upload_returns_direct_link() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/1/upload")
                .query_param("key", "host-key")
                .body_contains("name=\"image\"")
                .body_contains("filename=\"gear.png\"");
            then.status(200).json_body(json!({
                "data": {"url": "https://i.example/abc/gear.png"},
                "success": true
            }));
        });

        let link = host(&server)
            .upload(&ImageFile::new("gear.png", "image/png", b"png-bytes".to_vec()))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(link, "https://i.example/abc/gear.png");
    }

    #[tokio::test]
    async fn test_error_status_fails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/1/upload");
            then.status(400).body("Invalid API key");
        });

        let err = host(&server)
            .upload(&ImageFile::new("gear.png", "image/png", b"png".to_vec()))
            .await
            .unwrap_err();

        assert!(matches!(err, AdminError::ImageHostError { .. }));
        assert!(err.to_string().contains("Invalid API key"));
    }

    #[tokio::test]
    async fn test_missing_link_fails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/1/upload");
            then.status(200).json_body(json!({"success": true}));
        });

        let result = host(&server)
            .upload(&ImageFile::new("gear.png", "image/png", b"png".to_vec()))
            .await;

        assert!(matches!(result, Err(AdminError::ImageHostError { .. })));
    }
}
