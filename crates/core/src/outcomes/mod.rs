//! Outcome extraction domain

pub mod extraction;
pub mod ports;

pub use extraction::{OutcomeExtractor, SubjectOnlySummarizer};
pub use ports::Summarizer;
