//! JSONL-backed document store.
//!
//! Each collection path maps to `{root}/{path}.jsonl`. Writes append
//! [`StoreOperation`] lines; reads replay the log from the top. The log is the
//! only state, so two processes pointed at the same root see the same data.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use press_core::collaborators::{Document, DocumentStore, merge_patch};
use press_core::errors::CollaboratorError;
use press_core::ids::{self, PREFIX_DOCUMENT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::watch;

use crate::error::StoreError;

const LOG_VERSION: u32 = 1;

const fn default_log_version() -> u32 {
    LOG_VERSION
}

/// Kind of mutation recorded in a collection log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreOp {
    Add,
    Update,
}

/// One line of a collection log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreOperation {
    /// Log format version. Lines without it are version 1.
    #[serde(default = "default_log_version")]
    pub v: u32,
    /// RFC 3339 timestamp of the write.
    pub ts: String,
    pub op: StoreOp,
    pub id: String,
    /// Full record for `add`, shallow patch for `update`.
    pub data: Value,
}

impl StoreOperation {
    fn new(op: StoreOp, id: String, data: Value) -> Self {
        Self {
            v: LOG_VERSION,
            ts: Utc::now().to_rfc3339(),
            op,
            id,
            data,
        }
    }
}

/// Collections persisted as append-only JSONL logs under a root directory.
pub struct JsonlStore {
    root: PathBuf,
    // Serializes appends and owns one snapshot feed per collection path.
    feeds: Mutex<HashMap<String, watch::Sender<Vec<Document>>>>,
}

impl JsonlStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            feeds: Mutex::new(HashMap::new()),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, watch::Sender<Vec<Document>>>> {
        self.feeds.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// File backing a collection path. Rejects paths that are empty, absolute,
    /// or contain `.`/`..` segments.
    fn log_path(&self, path: &str) -> Result<PathBuf, StoreError> {
        let relative = Path::new(path);
        let valid = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !valid {
            return Err(StoreError::InvalidPath(path.to_string()));
        }
        let mut file = self.root.join(relative).into_os_string();
        file.push(".jsonl");
        Ok(PathBuf::from(file))
    }

    fn replay(&self, path: &str) -> Result<Vec<Document>, StoreError> {
        let file = self.log_path(path)?;
        if !file.exists() {
            return Ok(Vec::new());
        }
        let ops: Vec<StoreOperation> = serde_jsonlines::json_lines(&file)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut docs: Vec<Document> = Vec::with_capacity(ops.len());
        for op in ops {
            if op.v != LOG_VERSION {
                return Err(StoreError::UnsupportedVersion {
                    path: path.to_string(),
                    version: op.v,
                });
            }
            match op.op {
                StoreOp::Add => docs.push(Document {
                    id: op.id,
                    data: op.data,
                }),
                StoreOp::Update => match docs.iter_mut().find(|d| d.id == op.id) {
                    Some(doc) => merge_patch(&mut doc.data, op.data),
                    None => tracing::warn!(path, id = %op.id, "update for unknown document in log"),
                },
            }
        }
        Ok(docs)
    }

    fn append(&self, path: &str, ops: &[StoreOperation]) -> Result<(), StoreError> {
        let file = self.log_path(path)?;
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        serde_jsonlines::append_json_lines(&file, ops)?;
        Ok(())
    }

    fn publish(&self, feeds: &HashMap<String, watch::Sender<Vec<Document>>>, path: &str) {
        let Some(feed) = feeds.get(path) else {
            return;
        };
        match self.replay(path) {
            Ok(docs) => {
                feed.send_replace(docs);
            }
            Err(error) => tracing::warn!(path, %error, "failed to refresh subscribers"),
        }
    }
}

#[async_trait]
impl DocumentStore for JsonlStore {
    async fn list(&self, path: &str) -> Result<Vec<Document>, CollaboratorError> {
        Ok(self.replay(path)?)
    }

    async fn add(&self, path: &str, record: Value) -> Result<String, CollaboratorError> {
        let mut ids = self.add_batch(path, vec![record]).await?;
        ids.pop()
            .ok_or_else(|| CollaboratorError::Persistence("no id assigned".into()))
    }

    /// All records are appended in a single call, so either every line lands
    /// or the error surfaces before any subscriber sees the batch.
    async fn add_batch(
        &self,
        path: &str,
        records: Vec<Value>,
    ) -> Result<Vec<String>, CollaboratorError> {
        let ops = records
            .into_iter()
            .map(|data| {
                Ok(StoreOperation::new(
                    StoreOp::Add,
                    ids::generate(PREFIX_DOCUMENT)?,
                    data,
                ))
            })
            .collect::<Result<Vec<_>, StoreError>>()?;
        let new_ids = ops.iter().map(|op| op.id.clone()).collect();

        let feeds = self.lock();
        self.append(path, &ops)?;
        self.publish(&feeds, path);
        tracing::debug!(path, count = ops.len(), "appended documents");
        Ok(new_ids)
    }

    async fn update(&self, path: &str, id: &str, patch: Value) -> Result<(), CollaboratorError> {
        let feeds = self.lock();
        if !self.replay(path)?.iter().any(|d| d.id == id) {
            return Err(StoreError::NotFound {
                path: path.to_string(),
                id: id.to_string(),
            }
            .into());
        }
        self.append(
            path,
            &[StoreOperation::new(StoreOp::Update, id.to_string(), patch)],
        )?;
        self.publish(&feeds, path);
        Ok(())
    }

    async fn subscribe(
        &self,
        path: &str,
    ) -> Result<watch::Receiver<Vec<Document>>, CollaboratorError> {
        let mut feeds = self.lock();
        if let Some(feed) = feeds.get(path) {
            return Ok(feed.subscribe());
        }
        let (feed, rx) = watch::channel(self.replay(path)?);
        feeds.insert(path.to_string(), feed);
        Ok(rx)
    }
}
