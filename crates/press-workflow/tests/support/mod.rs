//! Collaborator doubles for controller tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use press_core::collaborators::{
    Clipboard, Document, DocumentStore, PublishRelay, RelayArticle, RelayReceipt, TextGenerator,
    TrendSource,
};
use press_core::entities::TrendItem;
use press_core::errors::CollaboratorError;
use press_store::MemoryStore;
use press_workflow::{WorkflowController, WorkflowSettings};
use serde_json::{Value, json};
use tokio::sync::{Notify, watch};

pub const DRAFT_BODY: &str = "**Grow, Fast**

Hey, fellow entrepreneurs!

Most owners wait too long to ask for referrals.

**The Challenge:** [Generate content here that contextualizes the common situation small businesses face.]

Ask every happy customer the same week you deliver.
---";

pub fn two_ideas() -> Value {
    json!([
        { "title": "Grow, Fast", "flair": "🚀 Growth Hacks & Breakthroughs" },
        { "title": "Say \"yes\" to free tools", "flair": "💡 Freebie Fortune Finders" }
    ])
}

// ── Generator ───────────────────────────────────────────────────────

/// Replays queued responses in order and records every prompt.
#[derive(Default)]
pub struct ScriptedGenerator {
    structured: Mutex<VecDeque<Result<Value, CollaboratorError>>>,
    text: Mutex<VecDeque<Result<String, CollaboratorError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_ideas(&self, response: Result<Value, CollaboratorError>) -> &Self {
        self.structured.lock().unwrap().push_back(response);
        self
    }

    pub fn push_draft(&self, response: Result<String, CollaboratorError>) -> &Self {
        self.text.lock().unwrap().push_back(response);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

fn exhausted() -> CollaboratorError {
    CollaboratorError::upstream("generator", "script exhausted")
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String, CollaboratorError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.text.lock().unwrap().pop_front().unwrap_or_else(|| Err(exhausted()))
    }

    async fn generate_structured(
        &self,
        prompt: &str,
        _schema: &Value,
    ) -> Result<Value, CollaboratorError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.structured
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(exhausted()))
    }
}

/// Parks every call until released, so a test can observe the in-flight state.
pub struct BlockingGenerator {
    pub entered: Notify,
    pub release: Notify,
    inner: Arc<ScriptedGenerator>,
}

impl BlockingGenerator {
    pub fn wrap(inner: Arc<ScriptedGenerator>) -> Arc<Self> {
        Arc::new(Self {
            entered: Notify::new(),
            release: Notify::new(),
            inner,
        })
    }

    async fn park(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

#[async_trait]
impl TextGenerator for BlockingGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String, CollaboratorError> {
        self.park().await;
        self.inner.generate_text(prompt).await
    }

    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &Value,
    ) -> Result<Value, CollaboratorError> {
        self.park().await;
        self.inner.generate_structured(prompt, schema).await
    }
}

// ── Clipboard / relay / trends ──────────────────────────────────────

#[derive(Default)]
pub struct RecordingClipboard {
    writes: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

impl RecordingClipboard {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clipboard for RecordingClipboard {
    async fn write(&self, text: &str) -> Result<(), CollaboratorError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CollaboratorError::upstream("clipboard", "permission denied"));
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingRelay {
    published: Mutex<Vec<RelayArticle>>,
    pub fail: AtomicBool,
}

impl RecordingRelay {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn published(&self) -> Vec<RelayArticle> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl PublishRelay for RecordingRelay {
    async fn publish(&self, article: &RelayArticle) -> Result<RelayReceipt, CollaboratorError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CollaboratorError::upstream("relay", "403 - flair required"));
        }
        self.published.lock().unwrap().push(article.clone());
        Ok(RelayReceipt {
            status: "Success".to_string(),
        })
    }
}

pub struct StaticTrends(pub Vec<TrendItem>);

#[async_trait]
impl TrendSource for StaticTrends {
    async fn fetch_trends(&self, _community: &str) -> Result<Vec<TrendItem>, CollaboratorError> {
        Ok(self.0.clone())
    }
}

// ── Store ───────────────────────────────────────────────────────────

/// A [`MemoryStore`] whose writes can be switched to fail and whose lists can
/// be held open until released.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    pub fail_writes: AtomicBool,
    pub hold_lists: AtomicBool,
    pub list_entered: Notify,
    pub list_release: Notify,
}

impl FlakyStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn check(&self) -> Result<(), CollaboratorError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(CollaboratorError::Persistence("disk full".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn list(&self, path: &str) -> Result<Vec<Document>, CollaboratorError> {
        if self.hold_lists.load(Ordering::SeqCst) {
            self.list_entered.notify_one();
            self.list_release.notified().await;
        }
        self.inner.list(path).await
    }

    async fn add(&self, path: &str, record: Value) -> Result<String, CollaboratorError> {
        self.check()?;
        self.inner.add(path, record).await
    }

    async fn add_batch(
        &self,
        path: &str,
        records: Vec<Value>,
    ) -> Result<Vec<String>, CollaboratorError> {
        self.check()?;
        self.inner.add_batch(path, records).await
    }

    async fn update(&self, path: &str, id: &str, patch: Value) -> Result<(), CollaboratorError> {
        self.check()?;
        self.inner.update(path, id, patch).await
    }

    async fn subscribe(
        &self,
        path: &str,
    ) -> Result<watch::Receiver<Vec<Document>>, CollaboratorError> {
        self.inner.subscribe(path).await
    }
}

// ── Harness ─────────────────────────────────────────────────────────

pub struct Harness {
    pub generator: Arc<ScriptedGenerator>,
    pub clipboard: Arc<RecordingClipboard>,
    pub relay: Arc<RecordingRelay>,
    pub controller: WorkflowController,
}

/// In-memory controller with scripted collaborators and no store.
pub fn harness() -> Harness {
    let generator = ScriptedGenerator::new();
    let clipboard = RecordingClipboard::new();
    let relay = RecordingRelay::new();
    let controller = WorkflowController::builder(
        WorkflowSettings::default(),
        generator.clone(),
        clipboard.clone(),
        relay.clone(),
    )
    .build();
    Harness {
        generator,
        clipboard,
        relay,
        controller,
    }
}
