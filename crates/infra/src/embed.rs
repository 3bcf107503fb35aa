//! Document embedder that records what would be written.
//!
//! Writing into Word, SharePoint and Loop documents is not wired to a
//! provider yet; every routine logs the rendered outcome it was handed and
//! reports success so the rest of the pipeline behaves as if the content
//! landed.

use async_trait::async_trait;
use reviewbot_core::DocumentEmbedder;
use reviewbot_domain::{DocumentKind, MeetingOutcome, Result};
use tracing::{debug, info};

#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingDocumentEmbedder;

impl LoggingDocumentEmbedder {
    pub fn new() -> Self {
        Self
    }

    /// Text that would be written into the document.
    fn render(kind: DocumentKind, location: &str, outcome: &MeetingOutcome) -> String {
        let content = outcome.to_plain_text();
        info!(
            %kind,
            location,
            decisions = outcome.decisions.len(),
            action_items = outcome.action_items.len(),
            tasks = outcome.tasks.len(),
            bytes = content.len(),
            "would embed outcome"
        );
        debug!(%kind, location, %content, "rendered outcome");
        content
    }
}

#[async_trait]
impl DocumentEmbedder for LoggingDocumentEmbedder {
    async fn embed_word(&self, url: &str, outcome: &MeetingOutcome) -> Result<bool> {
        Self::render(DocumentKind::Word, url, outcome);
        Ok(true)
    }

    async fn embed_sharepoint(
        &self,
        site_url: &str,
        file_path: &str,
        outcome: &MeetingOutcome,
    ) -> Result<bool> {
        let location = format!("{site_url}{file_path}");
        Self::render(DocumentKind::SharePoint, &location, outcome);
        Ok(true)
    }

    async fn embed_loop(&self, url: &str, outcome: &MeetingOutcome) -> Result<bool> {
        Self::render(DocumentKind::Loop, url, outcome);
        Ok(true)
    }
}
