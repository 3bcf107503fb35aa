//! Publishing of meeting outcomes to documents and task lists

pub mod ports;
pub mod publisher;
pub mod target;
pub mod tasks;

pub use ports::DocumentEmbedder;
pub use publisher::OutcomePublisher;
pub use target::classify_target;
pub use tasks::TaskPublisher;
