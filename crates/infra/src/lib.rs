//! # ReviewBot Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP transport with retry
//! - Microsoft Graph client and credential providers
//! - OpenAI-backed outcome summarizer
//! - Document embedders
//! - Configuration loading
//! - Subscription renewal scheduling
//!
//! ## Architecture
//! - Implements traits defined in `reviewbot-core`
//! - Depends on `reviewbot-domain` and `reviewbot-core`
//! - Contains all "impure" code (network, files, timers)

pub mod auth;
pub mod config;
pub mod embed;
pub mod errors;
pub mod graph;
pub mod http;
pub mod integrations;
pub mod scheduling;

// Re-export commonly used items
pub use auth::{credential_provider, ClientCredentialsProvider, StaticTokenProvider};
pub use embed::LoggingDocumentEmbedder;
pub use errors::InfraError;
pub use graph::GraphClient;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::openai::{OpenAISummarizer, SummarizerError};
pub use scheduling::{SchedulerError, SubscriptionRenewer, SubscriptionRenewerConfig};
