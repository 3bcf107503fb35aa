//! # ReviewBot Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the graph provider, summarizer and
//!   document embedders
//! - The notification gateway and event classifier
//! - The meeting resolver and invitation acceptor
//! - Outcome extraction and publishing
//!
//! ## Architecture Principles
//! - Only depends on `reviewbot-domain`
//! - No HTTP or credential code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod graph_ports;
pub mod meetings;
pub mod notifications;
pub mod outcomes;
pub mod pipeline;
pub mod publishing;
pub mod subscriptions;

// Re-export specific items to avoid ambiguity
pub use graph_ports::{CredentialProvider, GraphCapability};
pub use meetings::{extract_meeting_id, InvitationAcceptor, MeetingId, MeetingResolver};
pub use notifications::{
    BatchReport, EventClassifier, WebhookGateway, WebhookRequest, WebhookResponse,
};
pub use outcomes::{OutcomeExtractor, SubjectOnlySummarizer, Summarizer};
pub use pipeline::{
    OutcomePipeline, PipelineReport, PlannerDestination, PublishPlan, PublishedDocument,
};
pub use publishing::{classify_target, DocumentEmbedder, OutcomePublisher, TaskPublisher};
pub use subscriptions::SubscriptionManager;
