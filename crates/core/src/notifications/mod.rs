//! Change-notification handling: webhook gateway and event classification

pub mod classifier;
pub mod gateway;

pub use classifier::EventClassifier;
pub use gateway::{BatchReport, WebhookGateway, WebhookRequest, WebhookResponse};
