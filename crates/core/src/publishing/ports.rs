//! Port interfaces for document publishing

use async_trait::async_trait;
use reviewbot_domain::{MeetingOutcome, Result};

/// Writes an outcome into a collaborative document.
///
/// Each routine returns whether the content was embedded.
#[async_trait]
pub trait DocumentEmbedder: Send + Sync {
    /// Embed into a Word document addressed by URL
    async fn embed_word(&self, url: &str, outcome: &MeetingOutcome) -> Result<bool>;

    /// Embed into a file of a SharePoint site
    async fn embed_sharepoint(
        &self,
        site_url: &str,
        file_path: &str,
        outcome: &MeetingOutcome,
    ) -> Result<bool>;

    /// Embed into a Loop component
    async fn embed_loop(&self, url: &str, outcome: &MeetingOutcome) -> Result<bool>;
}
