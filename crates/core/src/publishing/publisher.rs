//! Outcome publisher - dispatches an outcome to the embedder for its target.

use std::sync::Arc;

use reviewbot_domain::{MeetingOutcome, PublishTarget, Result, ReviewBotError};
use tracing::{info, warn};

use super::ports::DocumentEmbedder;
use super::target::classify_target;

/// Publishes outcomes into documents. No retries.
pub struct OutcomePublisher {
    embedder: Arc<dyn DocumentEmbedder>,
}

impl OutcomePublisher {
    pub fn new(embedder: Arc<dyn DocumentEmbedder>) -> Self {
        Self { embedder }
    }

    /// Publish `outcome` into the document at `url`.
    ///
    /// # Errors
    /// - `UnsupportedDocumentType` when the URL classifies as unknown; no
    ///   embed routine runs in that case
    /// - the embedder's error otherwise
    pub async fn publish(&self, url: &str, outcome: &MeetingOutcome) -> Result<bool> {
        let target = classify_target(url);
        info!(url, kind = %target.kind(), "publishing meeting outcome");

        let embedded = match &target {
            PublishTarget::Word { url } => self.embedder.embed_word(url, outcome).await?,
            PublishTarget::SharePoint { site_url, file_path } => {
                self.embedder.embed_sharepoint(site_url, file_path, outcome).await?
            }
            PublishTarget::Loop { url } => self.embedder.embed_loop(url, outcome).await?,
            PublishTarget::Unknown { url } => {
                warn!(url, "unsupported document type");
                return Err(ReviewBotError::UnsupportedDocumentType(url.clone()));
            }
        };

        info!(url, kind = %target.kind(), embedded, "outcome published");
        Ok(embedded)
    }
}
