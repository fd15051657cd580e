//! # press-store
//!
//! Document collection stores implementing
//! [`press_core::collaborators::DocumentStore`]:
//! - [`MemoryStore`]: process-local collections, used when nothing should persist
//! - [`JsonlStore`]: one append-only JSONL log per collection path
//!
//! Both deliver subscriptions as full snapshots over a `tokio::sync::watch`
//! channel; every write publishes the whole collection again.

mod error;
mod jsonl;
mod memory;

pub use error::StoreError;
pub use jsonl::{JsonlStore, StoreOp, StoreOperation};
pub use memory::MemoryStore;
