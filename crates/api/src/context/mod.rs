//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reviewbot_core::{
    DocumentEmbedder, EventClassifier, GraphCapability, InvitationAcceptor, MeetingResolver,
    OutcomeExtractor, OutcomePipeline, OutcomePublisher, PlannerDestination,
    SubjectOnlySummarizer, SubscriptionManager, Summarizer, TaskPublisher, WebhookGateway,
};
use reviewbot_domain::{Config, Result, ReviewBotError};
use reviewbot_infra::{
    credential_provider, GraphClient, HttpClient, LoggingDocumentEmbedder, OpenAISummarizer,
    SubscriptionRenewer,
};
use tracing::{info, warn};

/// Summarization calls run far longer than Graph calls.
const SUMMARIZER_TIMEOUT: Duration = Duration::from_secs(120);

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub graph: Arc<dyn GraphCapability>,
    pub gateway: WebhookGateway,
    pub pipeline: OutcomePipeline,
}

impl AppContext {
    /// Wire the production adapters described by `config`.
    ///
    /// # Errors
    /// `Config` when no usable Graph credentials are configured, or the
    /// HTTP transport cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let http = HttpClient::for_graph(&config.graph)?;
        let credentials = credential_provider(&config.graph, http.clone())?;
        let graph: Arc<dyn GraphCapability> = Arc::new(
            GraphClient::new(http, credentials).with_base_url(config.graph.base_url.clone()),
        );

        let summarizer_http = HttpClient::builder()
            .timeout(SUMMARIZER_TIMEOUT)
            .max_attempts(config.graph.max_attempts)
            .build()?;
        let summarizer: Arc<dyn Summarizer> =
            match OpenAISummarizer::from_config(&config.summarizer, summarizer_http) {
                Some(openai) => {
                    info!(model = %config.summarizer.model, "using OpenAI summarizer");
                    Arc::new(openai)
                }
                None => {
                    warn!("no summarizer API key configured, outcomes will be subject-only");
                    Arc::new(SubjectOnlySummarizer)
                }
            };

        Ok(Self::with_services(config, graph, summarizer, Arc::new(LoggingDocumentEmbedder::new())))
    }

    /// Assemble the context from already-built adapters.
    pub fn with_services(
        config: Config,
        graph: Arc<dyn GraphCapability>,
        summarizer: Arc<dyn Summarizer>,
        embedder: Arc<dyn DocumentEmbedder>,
    ) -> Self {
        let mailbox = config.graph.review_user_id.clone();

        let mut gateway = WebhookGateway::new(EventClassifier::new(graph.clone(), mailbox.clone()))
            .with_client_state(config.subscription.client_state.clone());
        if config.publishing.auto_accept {
            let acceptor = InvitationAcceptor::new(graph.clone(), mailbox.clone());
            gateway = gateway.with_invitation_acceptor(acceptor);
        }

        let pipeline = OutcomePipeline::new(
            MeetingResolver::new(graph.clone(), mailbox),
            OutcomeExtractor::new(summarizer),
            OutcomePublisher::new(embedder),
            TaskPublisher::new(graph.clone()),
        );

        Self { config, graph, gateway, pipeline }
    }

    /// Task list configured as the destination when a request names none.
    pub fn default_planner(&self) -> Option<PlannerDestination> {
        let publishing = &self.config.publishing;
        match (&publishing.planner_plan_id, &publishing.planner_bucket_id) {
            (Some(plan_id), Some(bucket_id)) => Some(PlannerDestination {
                plan_id: plan_id.clone(),
                bucket_id: bucket_id.clone(),
            }),
            _ => None,
        }
    }

    /// Register the mailbox change subscription and, when renewal is
    /// enabled, start the renewer.
    ///
    /// Returns `None` when no notification URL is configured or renewal is
    /// disabled. Dropping the returned renewer cancels further renewals.
    pub async fn start_subscription(&self) -> Result<Option<SubscriptionRenewer>> {
        let settings = &self.config.subscription;
        let Some(notification_url) = settings.notification_url.as_deref() else {
            info!("no notification URL configured, skipping subscription");
            return Ok(None);
        };

        let manager = Arc::new(SubscriptionManager::new(
            self.graph.clone(),
            self.config.graph.review_user_id.clone(),
            notification_url,
            settings.client_state.clone(),
        ));
        let created = manager.create(Utc::now()).await?;

        if !settings.renew {
            warn!("subscription renewal disabled, subscription will expire");
            return Ok(None);
        }

        let mut renewer =
            SubscriptionRenewer::new(settings.renewal_cron.clone(), manager, created);
        renewer.start().await.map_err(ReviewBotError::from)?;
        Ok(Some(renewer))
    }
}
