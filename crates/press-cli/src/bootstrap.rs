use std::sync::Arc;

use anyhow::Context;
use press_clean::{Cleaner, PatternSet};
use press_client::{GeminiClient, RelayClient};
use press_config::{CleanerConfig, PressConfig, StoreBackend, StoreConfig};
use press_core::collaborators::DocumentStore;
use press_store::{JsonlStore, MemoryStore};
use press_workflow::{WorkflowController, WorkflowSettings};

use crate::clipboard::StdoutClipboard;

pub fn load_config() -> anyhow::Result<PressConfig> {
    PressConfig::load_with_dotenv().context("failed to load press configuration")
}

/// Built-in scaffold patterns plus any configured pattern files.
pub fn build_cleaner(config: &CleanerConfig) -> anyhow::Result<Cleaner> {
    let mut patterns = PatternSet::builtin().clone();
    for path in &config.extra_patterns {
        let extra = PatternSet::load_file(path)
            .with_context(|| format!("failed to load cleaner patterns from {}", path.display()))?;
        tracing::debug!(path = %path.display(), count = extra.len(), "loaded extra patterns");
        patterns.extend(extra);
    }
    Ok(Cleaner::new(patterns).strip_title(config.strip_title))
}

pub fn open_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreBackend::Jsonl => {
            let store = JsonlStore::open(config.dir.clone()).with_context(|| {
                format!("failed to open jsonl store at {}", config.dir.display())
            })?;
            tracing::debug!(root = %store.root().display(), "jsonl store opened");
            Ok(Arc::new(store))
        }
    }
}

/// Wire the controller to the HTTP clients, the configured store, and the
/// stdout clipboard.
pub fn build_controller(config: &PressConfig) -> anyhow::Result<WorkflowController> {
    let gemini = GeminiClient::new(config.require_gemini()?)
        .context("failed to build generative-text client")?;
    let relay = Arc::new(RelayClient::new(&config.relay).context("failed to build relay client")?);

    let controller = WorkflowController::builder(
        WorkflowSettings::from_config(config),
        Arc::new(gemini),
        Arc::new(StdoutClipboard),
        relay.clone(),
    )
    .trends(relay)
    .store(open_store(&config.store)?)
    .cleaner(build_cleaner(&config.cleaner)?)
    .build();
    Ok(controller)
}
