pub mod articles;
pub mod clean;
pub mod ideas;
pub mod schema;
pub mod session;
pub mod trends;

use press_config::{PressConfig, StoreBackend};

/// Ideas and articles only outlive a process with a persistent backend.
fn warn_if_ephemeral(config: &PressConfig) {
    if config.store.backend == StoreBackend::Memory {
        tracing::warn!(
            "store.backend is 'memory'; nothing persists between runs (set PRESS_STORE__BACKEND=jsonl)"
        );
    }
}
