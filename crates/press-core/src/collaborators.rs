//! Contracts for everything the workflow talks to but does not own.
//!
//! Concrete implementations live in `press-client` (HTTP) and `press-store`
//! (document collections). The workflow only ever sees these traits.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::watch;

use crate::entities::TrendItem;
use crate::errors::CollaboratorError;

// ── Generative text ─────────────────────────────────────────────────

/// Prompt in, text or parsed JSON out. Implementations must not retry.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Free-text generation.
    async fn generate_text(&self, prompt: &str) -> Result<String, CollaboratorError>;

    /// Structured generation constrained by `schema`; returns the parsed JSON.
    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &Value,
    ) -> Result<Value, CollaboratorError>;
}

// ── Document collections ────────────────────────────────────────────

/// A stored record: the store-assigned ID plus the record body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

impl Document {
    /// Deserialize the record with the document ID merged in as `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorError::Persistence`] if the body is not an object
    /// or does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, CollaboratorError> {
        let Value::Object(mut map) = self.data.clone() else {
            return Err(CollaboratorError::Persistence(format!(
                "document {} is not an object",
                self.id
            )));
        };
        map.insert("id".to_string(), Value::String(self.id.clone()));
        serde_json::from_value(Value::Object(map)).map_err(|e| {
            CollaboratorError::Persistence(format!("document {} failed to decode: {e}", self.id))
        })
    }
}

/// Key-value collections addressed by slash-separated paths.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Current contents of a collection, in insertion order.
    async fn list(&self, path: &str) -> Result<Vec<Document>, CollaboratorError>;

    /// Insert a record and return its new ID.
    async fn add(&self, path: &str, record: Value) -> Result<String, CollaboratorError>;

    /// Insert several records. Stores that can write atomically should
    /// override this so a failure leaves none of the records behind.
    async fn add_batch(
        &self,
        path: &str,
        records: Vec<Value>,
    ) -> Result<Vec<String>, CollaboratorError> {
        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            ids.push(self.add(path, record).await?);
        }
        Ok(ids)
    }

    /// Shallow-merge `patch` into an existing record.
    async fn update(&self, path: &str, id: &str, patch: Value) -> Result<(), CollaboratorError>;

    /// Full-snapshot feed of a collection. Each message replaces the previous one.
    async fn subscribe(
        &self,
        path: &str,
    ) -> Result<watch::Receiver<Vec<Document>>, CollaboratorError>;
}

/// Shallow JSON merge used by stores implementing [`DocumentStore::update`].
pub fn merge_patch(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                target.insert(key, value);
            }
        }
        (target, patch) => *target = patch,
    }
}

// ── Clipboard ───────────────────────────────────────────────────────

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write(&self, text: &str) -> Result<(), CollaboratorError>;
}

// ── Backend relay ───────────────────────────────────────────────────

/// Payload handed to the relay for publication on the community target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayArticle {
    pub title: String,
    pub flair: String,
    pub content: String,
    pub subreddit: String,
}

/// Relay acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayReceipt {
    pub status: String,
}

#[async_trait]
pub trait PublishRelay: Send + Sync {
    async fn publish(&self, article: &RelayArticle) -> Result<RelayReceipt, CollaboratorError>;
}

// ── Trends ──────────────────────────────────────────────────────────

#[async_trait]
pub trait TrendSource: Send + Sync {
    async fn fetch_trends(&self, community: &str) -> Result<Vec<TrendItem>, CollaboratorError>;
}
