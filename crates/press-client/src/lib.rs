//! # press-client
//!
//! HTTP clients for Pressroom's external services:
//! - [`GeminiClient`]: the generative-text API (`generateContent`)
//! - [`RelayClient`]: the backend worker that publishes to the community and
//!   fetches trending posts
//!
//! Both implement the collaborator traits from `press_core::collaborators`.
//! Neither retries; a failed call is reported once and the caller decides.

mod error;
mod gemini;
mod http;
mod relay;

pub use error::ClientError;
pub use gemini::GeminiClient;
pub use relay::RelayClient;
