//! REST document store - the managed backend's document API.
//!
//! Documents are addressed as `documents/{collection}/{id}`. Updates are
//! sent as a PATCH carrying an ordered list of field operations so the
//! backend can apply array union/remove atomically server-side.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde_json::json;

use crate::ports::{Document, DocumentStore, FieldChange, FieldOp, StoreError};

/// Configuration for the REST document store.
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Project API key sent as the `key` query parameter.
    api_key: Secret<String>,
    /// Base URL of the document endpoints.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl RestStoreConfig {
    /// Creates a configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://firestore.googleapis.com/v1".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the base URL (e.g. a local emulator).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Document store over the backend's REST surface.
pub struct RestDocumentStore {
    config: RestStoreConfig,
    client: Client,
}

impl RestDocumentStore {
    /// Creates a store with the given configuration.
    pub fn new(config: RestStoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        Ok(Self { config, client })
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/documents/{}/{}?key={}",
            self.config.base_url,
            collection,
            id,
            self.config.api_key()
        )
    }

    fn encode_change(change: &FieldChange) -> serde_json::Value {
        match &change.op {
            FieldOp::Set(value) => json!({"field": change.field, "set": value}),
            FieldOp::ArrayUnion(value) => json!({"field": change.field, "arrayUnion": value}),
            FieldOp::ArrayRemove(value) => json!({"field": change.field, "arrayRemove": value}),
        }
    }

    async fn error_from(response: reqwest::Response) -> StoreError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        StoreError::Backend(format!("status {status}: {body}"))
    }
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let response = self
            .client
            .get(self.document_url(collection, id))
            .send()
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let doc = response
                    .json::<Document>()
                    .await
                    .map_err(|err| StoreError::Backend(err.to_string()))?;
                Ok(Some(doc))
            }
            _ => Err(Self::error_from(response).await),
        }
    }

    async fn set(&self, collection: &str, id: &str, fields: Document) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.document_url(collection, id))
            .json(&fields)
            .send()
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        changes: Vec<FieldChange>,
    ) -> Result<(), StoreError> {
        let ops: Vec<_> = changes.iter().map(Self::encode_change).collect();
        let response = self
            .client
            .patch(self.document_url(collection, id))
            .json(&json!({ "ops": ops }))
            .send()
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::not_found(collection, id)),
            status if status.is_success() => Ok(()),
            _ => Err(Self::error_from(response).await),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.document_url(collection, id))
            .send()
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?;

        // Deleting an absent document is a success by contract.
        match response.status() {
            StatusCode::NOT_FOUND => Ok(()),
            status if status.is_success() => Ok(()),
            _ => Err(Self::error_from(response).await),
        }
    }
}
