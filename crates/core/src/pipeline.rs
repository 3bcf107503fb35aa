//! Outcome pipeline - resolve a meeting, extract its outcome and publish it.
//!
//! Publishing only happens when the resolution produced a transcript and the
//! caller named at least one destination. The request identifiers are checked
//! first, then destination URLs, both before any provider call.

use reviewbot_domain::{
    DocumentKind, MeetingOutcome, MeetingResolution, ResolveRequest, Result, ReviewBotError,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::meetings::MeetingResolver;
use crate::outcomes::OutcomeExtractor;
use crate::publishing::{classify_target, OutcomePublisher, TaskPublisher};

/// Task list destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerDestination {
    pub plan_id: String,
    pub bucket_id: String,
}

/// Where the outcome of a processed meeting should go.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishPlan {
    #[serde(default)]
    pub document_urls: Vec<String>,
    #[serde(default)]
    pub planner: Option<PlannerDestination>,
}

impl PublishPlan {
    pub fn is_empty(&self) -> bool {
        self.document_urls.is_empty() && self.planner.is_none()
    }
}

/// Result of publishing into one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedDocument {
    pub url: String,
    pub kind: DocumentKind,
    pub embedded: bool,
}

/// Resolution plus whatever was extracted and published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    #[serde(flatten)]
    pub resolution: MeetingResolution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<MeetingOutcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub published: Vec<PublishedDocument>,
}

impl PipelineReport {
    fn resolution_only(resolution: MeetingResolution) -> Self {
        Self { resolution, outcome: None, published: Vec::new() }
    }
}

pub struct OutcomePipeline {
    resolver: MeetingResolver,
    extractor: OutcomeExtractor,
    publisher: OutcomePublisher,
    tasks: TaskPublisher,
}

impl OutcomePipeline {
    pub fn new(
        resolver: MeetingResolver,
        extractor: OutcomeExtractor,
        publisher: OutcomePublisher,
        tasks: TaskPublisher,
    ) -> Self {
        Self { resolver, extractor, publisher, tasks }
    }

    /// Resolve the meeting named by `request`, then publish per `plan`.
    ///
    /// # Errors
    /// - `InvalidRequest` / `NotImplemented` for a request without an event id,
    ///   checked before the destinations
    /// - `UnsupportedDocumentType` for an unknown destination URL
    /// - any error of [`MeetingResolver::resolve`]
    ///
    /// Extraction and embedding failures are logged and leave the report
    /// without the affected outcome or with `embedded = false`.
    pub async fn run(
        &self,
        request: &ResolveRequest,
        plan: &PublishPlan,
    ) -> Result<PipelineReport> {
        MeetingResolver::post_meeting_event(request)?;

        for url in &plan.document_urls {
            if !classify_target(url).is_supported() {
                warn!(url, "rejecting unsupported document destination");
                return Err(ReviewBotError::UnsupportedDocumentType(url.clone()));
            }
        }

        let resolution = self.resolver.resolve(request).await?;

        if plan.is_empty() {
            return Ok(PipelineReport::resolution_only(resolution));
        }

        if !resolution.has_transcript() {
            info!(
                event_id = resolution.event_id.as_deref().unwrap_or_default(),
                "no transcript, skipping outcome publishing"
            );
            return Ok(PipelineReport::resolution_only(resolution));
        }

        let transcript = resolution.transcript.as_deref().unwrap_or_default();

        let subject = resolution.subject.as_deref().unwrap_or_default();
        let outcome = match self.extractor.extract(transcript, subject).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(subject, error = %err, "outcome extraction failed");
                return Ok(PipelineReport::resolution_only(resolution));
            }
        };

        let mut published = Vec::with_capacity(plan.document_urls.len());
        for url in &plan.document_urls {
            let embedded = match self.publisher.publish(url, &outcome).await {
                Ok(embedded) => embedded,
                Err(err) => {
                    warn!(url, error = %err, "failed to publish outcome");
                    false
                }
            };
            published.push(PublishedDocument {
                url: url.clone(),
                kind: classify_target(url).kind(),
                embedded,
            });
        }

        if let Some(planner) = &plan.planner {
            self.tasks.create_tasks(&planner.plan_id, &planner.bucket_id, &outcome).await;
        }

        Ok(PipelineReport { resolution, outcome: Some(outcome), published })
    }
}
