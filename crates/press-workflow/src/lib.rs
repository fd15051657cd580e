//! # press-workflow
//!
//! The idea → draft → publish workflow.
//!
//! [`WorkflowController`] owns the idea list, the single current draft, and
//! the published history. It talks to the outside world only through the
//! collaborator traits in `press_core::collaborators`, and runs at most one
//! state-mutating operation at a time.
//!
//! ```text
//! generate_ideas ──→ approve_idea ──→ export_draft / copy_clean_content
//!       │                 │                 │
//!  reject_idea       discard_draft    publish_draft / publish_to_external_target
//! ```

mod controller;
mod error;
pub mod flight;
pub mod phase;
pub mod prompts;
mod settings;

pub use controller::{ExternalPublication, WorkflowController, WorkflowControllerBuilder};
pub use error::WorkflowError;
pub use flight::{FlightState, OperationKind};
pub use phase::WorkflowPhase;
pub use prompts::IdeaRequest;
pub use settings::WorkflowSettings;
