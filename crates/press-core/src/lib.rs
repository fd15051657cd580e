//! # press-core
//!
//! Core types, collaborator contracts, and error types for Pressroom.
//!
//! This crate provides the foundational types shared across all Pressroom crates:
//! - Entity structs for ideas, drafts, published articles, and trend items
//! - Status enums with state machine transitions
//! - The fixed flair enumeration
//! - ID prefix constants and generation helpers
//! - Collaborator traits for generation, storage, clipboard, relay, and trends
//! - CSV row serialization used by draft export

pub mod collaborators;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod export;
pub mod identity;
pub mod ids;
