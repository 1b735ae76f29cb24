//! Firestore REST adapter for the document store port.

pub mod value;

use crate::config::FirestoreConfig;
use crate::core::{DocumentStore, Fields};
use crate::domain::model::Document;
use crate::utils::error::{AdminError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

const PAGE_SIZE: &str = "300";

#[derive(Debug, Deserialize)]
struct RawDocument {
    name: String,
    #[serde(default)]
    fields: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<RawDocument>,
    next_page_token: Option<String>,
}

pub struct FirestoreStore {
    client: Client,
    documents_url: String,
    api_key: Option<String>,
    auth_token: Option<String>,
}

impl FirestoreStore {
    pub fn new(config: &FirestoreConfig) -> Self {
        let documents_url = format!(
            "{}/projects/{}/databases/{}/documents",
            config.base_url().trim_end_matches('/'),
            config.project_id,
            config.database()
        );
        Self {
            client: Client::new(),
            documents_url,
            api_key: config.api_key().map(str::to_string),
            auth_token: config.auth_token().map(str::to_string),
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.documents_url, collection)
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.documents_url, collection, id)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut builder = self.client.request(method, url);
        if let Some(key) = &self.api_key {
            builder = builder.query(&[("key", key)]);
        }
        if let Some(token) = &self.auth_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!("Firestore {} -> {}", path, status);

        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(AdminError::NotFoundError {
                path: path.to_string(),
            });
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
            .unwrap_or(body);
        Err(AdminError::StoreError {
            status: status.as_u16(),
            path: path.to_string(),
            message,
        })
    }
}

fn into_document(raw: RawDocument) -> Result<Document> {
    let id = raw
        .name
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AdminError::StoreError {
            status: 200,
            path: raw.name.clone(),
            message: "document name has no id segment".to_string(),
        })?
        .to_string();
    let data = value::decode_fields(raw.fields.as_ref())?;
    Ok(Document { id, data })
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let path = format!("{}/{}", collection, id);
        let url = self.document_url(collection, id);
        match self.send(self.request(Method::GET, &url), &path).await {
            Ok(response) => {
                let raw: RawDocument = response.json().await?;
                into_document(raw).map(Some)
            }
            Err(AdminError::NotFoundError { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let url = self.collection_url(collection);
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut builder = self
                .request(Method::GET, &url)
                .query(&[("pageSize", PAGE_SIZE)]);
            if let Some(token) = &page_token {
                builder = builder.query(&[("pageToken", token)]);
            }

            let page: ListResponse = match self.send(builder, collection).await {
                Ok(response) => response.json().await?,
                // 集合尚未建立時視為空集合
                Err(AdminError::NotFoundError { .. }) => break,
                Err(e) => return Err(e),
            };

            for raw in page.documents {
                documents.push(into_document(raw)?);
            }

            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(token) if page_token.as_deref() == Some(token.as_str()) => {
                    return Err(AdminError::StoreError {
                        status: 200,
                        path: collection.to_string(),
                        message: format!("page token '{}' repeated", token),
                    });
                }
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(documents)
    }

    async fn set(&self, collection: &str, id: &str, data: Fields) -> Result<()> {
        let path = format!("{}/{}", collection, id);
        let body = json!({ "fields": value::encode_fields(&data) });
        let builder = self
            .request(Method::PATCH, &self.document_url(collection, id))
            .json(&body);
        self.send(builder, &path).await?;
        tracing::debug!("Firestore set {}", path);
        Ok(())
    }

    async fn add(&self, collection: &str, data: Fields) -> Result<String> {
        let body = json!({ "fields": value::encode_fields(&data) });
        let builder = self
            .request(Method::POST, &self.collection_url(collection))
            .json(&body);
        let response = self.send(builder, collection).await?;
        let raw: RawDocument = response.json().await?;
        let doc = into_document(raw)?;
        tracing::debug!("Firestore added {}/{}", collection, doc.id);
        Ok(doc.id)
    }

    async fn update(&self, collection: &str, id: &str, data: Fields) -> Result<()> {
        let path = format!("{}/{}", collection, id);
        let mut field_paths: Vec<&String> = data.keys().collect();
        field_paths.sort();

        let mut builder = self.request(Method::PATCH, &self.document_url(collection, id));
        for field in field_paths {
            builder = builder.query(&[("updateMask.fieldPaths", field)]);
        }
        let builder = builder
            .query(&[("currentDocument.exists", "true")])
            .json(&json!({ "fields": value::encode_fields(&data) }));

        self.send(builder, &path).await?;
        tracing::debug!("Firestore updated {} ({} fields)", path, data.len());
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let path = format!("{}/{}", collection, id);
        let builder = self.request(Method::DELETE, &self.document_url(collection, id));
        match self.send(builder, &path).await {
            Ok(_) | Err(AdminError::NotFoundError { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
