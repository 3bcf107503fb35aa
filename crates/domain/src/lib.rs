//! # ReviewBot Domain
//!
//! Business domain types and models for ReviewBot.
//!
//! This crate contains:
//! - Calendar notification and meeting types
//! - Meeting outcome and publish target types
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other ReviewBot crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
