//! In-memory document store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use press_core::collaborators::{Document, DocumentStore, merge_patch};
use press_core::errors::CollaboratorError;
use press_core::ids::{self, PREFIX_DOCUMENT};
use serde_json::Value;
use tokio::sync::watch;

use crate::error::StoreError;

struct Collection {
    docs: Vec<Document>,
    feed: watch::Sender<Vec<Document>>,
}

impl Collection {
    fn new() -> Self {
        let (feed, _) = watch::channel(Vec::new());
        Self {
            docs: Vec::new(),
            feed,
        }
    }

    fn publish(&self) {
        self.feed.send_replace(self.docs.clone());
    }
}

/// Collections held in process memory. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Collection>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Collection>> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, path: &str) -> Result<Vec<Document>, CollaboratorError> {
        Ok(self
            .lock()
            .get(path)
            .map(|c| c.docs.clone())
            .unwrap_or_default())
    }

    async fn add(&self, path: &str, record: Value) -> Result<String, CollaboratorError> {
        let mut ids = self.add_batch(path, vec![record]).await?;
        ids.pop()
            .ok_or_else(|| CollaboratorError::Persistence("no id assigned".into()))
    }

    async fn add_batch(
        &self,
        path: &str,
        records: Vec<Value>,
    ) -> Result<Vec<String>, CollaboratorError> {
        let docs = records
            .into_iter()
            .map(|data| {
                Ok(Document {
                    id: ids::generate(PREFIX_DOCUMENT)?,
                    data,
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;
        let new_ids = docs.iter().map(|d| d.id.clone()).collect();

        let mut collections = self.lock();
        let collection = collections
            .entry(path.to_string())
            .or_insert_with(Collection::new);
        collection.docs.extend(docs);
        collection.publish();
        tracing::debug!(path, count = collection.docs.len(), "memory collection updated");
        Ok(new_ids)
    }

    async fn update(&self, path: &str, id: &str, patch: Value) -> Result<(), CollaboratorError> {
        let mut collections = self.lock();
        let doc = collections
            .get_mut(path)
            .and_then(|c| c.docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| StoreError::NotFound {
                path: path.to_string(),
                id: id.to_string(),
            })?;
        merge_patch(&mut doc.data, patch);
        if let Some(collection) = collections.get(path) {
            collection.publish();
        }
        Ok(())
    }

    async fn subscribe(
        &self,
        path: &str,
    ) -> Result<watch::Receiver<Vec<Document>>, CollaboratorError> {
        let mut collections = self.lock();
        let collection = collections
            .entry(path.to_string())
            .or_insert_with(Collection::new);
        Ok(collection.feed.subscribe())
    }
}
