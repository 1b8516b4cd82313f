use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::RecordStore;
use async_trait::async_trait;
use recordbook_core::{Field, Record, StoredRecord};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Map, Value as JsonValue};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// A store backed by the Cloud Firestore REST API (v1).
///
/// Every record field is written as a `stringValue`. Documents get their ids
/// from Firestore.
pub struct FirestoreStore {
    client: Client,
    collection_url: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct Document {
    name: String,
    #[serde(default)]
    fields: HashMap<String, JsonValue>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<Document>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl FirestoreStore {
    /// Build a store client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Config` if no project id is configured, or
    /// `StoreError::Http` if the HTTP client cannot be built.
    pub fn new(config: &StoreConfig) -> StoreResult<Self> {
        let project_id = config
            .project_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| StoreError::Config("project_id is not set".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            // Disable system proxy lookup to avoid macOS system-configuration issues
            .no_proxy()
            .build()
            .map_err(|e| StoreError::Http(e.to_string()))?;

        let collection_url = format!(
            "{}/v1/projects/{}/databases/{}/documents/{}",
            config.base_url.trim_end_matches('/'),
            project_id,
            config.database,
            config.collection
        );

        Ok(Self {
            client,
            collection_url,
            api_key: config.api_key.clone(),
        })
    }

    /// URL of the collection records are written to.
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn with_key(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.query(&[("key", key.as_str())]),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> StoreResult<Response> {
        let response = self
            .with_key(request)
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|parsed| parsed.error.message)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Unknown").to_string());
        Err(StoreError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// Firestore `fields` object for a record, extras included.
fn to_fields(record: &Record) -> Map<String, JsonValue> {
    let mut fields = Map::new();
    for (key, value) in &record.extra {
        fields.insert(key.clone(), json!({ "stringValue": value }));
    }
    for (field, value) in record.fields() {
        fields.insert(field.as_str().to_string(), json!({ "stringValue": value }));
    }
    fields
}

/// Text of a Firestore value, for the scalar kinds a record can hold.
fn value_text(value: &JsonValue) -> Option<String> {
    if let Some(s) = value.get("stringValue").and_then(JsonValue::as_str) {
        return Some(s.to_string());
    }
    // integerValue is transmitted as a JSON string
    if let Some(i) = value.get("integerValue") {
        return i.as_str().map(str::to_string).or_else(|| Some(i.to_string()));
    }
    if let Some(d) = value.get("doubleValue").and_then(JsonValue::as_f64) {
        return Some(d.to_string());
    }
    value
        .get("booleanValue")
        .and_then(JsonValue::as_bool)
        .map(|b| b.to_string())
}

fn document_id(name: &str) -> StoreResult<String> {
    name.rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| StoreError::Decode(format!("document name without id: {name:?}")))
}

fn to_stored(document: Document) -> StoreResult<StoredRecord> {
    let id = document_id(&document.name)?;
    let mut record = Record::default();
    for (key, value) in &document.fields {
        let Some(text) = value_text(value) else {
            continue;
        };
        match Field::from_canonical(key) {
            Some(field) => record.set(field, text),
            None => {
                record.extra.insert(key.clone(), text);
            }
        }
    }
    Ok(StoredRecord::new(id, record))
}

#[async_trait]
impl RecordStore for FirestoreStore {
    async fn insert(&self, record: &Record) -> StoreResult<String> {
        let body = json!({ "fields": to_fields(record) });
        debug!(url = %self.collection_url, "creating document");

        let response = self
            .send(self.client.post(&self.collection_url).json(&body))
            .await?;
        let document: Document = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        document_id(&document.name)
    }

    async fn list_all(&self) -> StoreResult<Vec<StoredRecord>> {
        let mut stored = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.client.get(&self.collection_url);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }
            debug!(url = %self.collection_url, fetched = stored.len(), "listing documents");

            let page: ListResponse = self
                .send(request)
                .await?
                .json()
                .await
                .map_err(|e| StoreError::Decode(e.to_string()))?;

            for document in page.documents {
                stored.push(to_stored(document)?);
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(stored)
    }
}
