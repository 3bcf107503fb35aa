//! Cron-driven renewal of the mailbox change subscription.
//!
//! Change subscriptions expire one window after they are created or renewed.
//! The renewer holds the current subscription and, on every tick of its cron
//! schedule, extends it through [`SubscriptionManager::renew`]. The schedule
//! must fire more often than the expiry window.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use croner::Cron;
use reviewbot_core::SubscriptionManager;
use reviewbot_domain::constants::SUBSCRIPTION_TTL_SECS;
use reviewbot_domain::{Result as DomainResult, Subscription};
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::scheduling::error::{SchedulerError, SchedulerResult};

/// Upper bound on the occurrences inspected when measuring a schedule.
const MAX_INSPECTED_TICKS: usize = 10_000;

/// Configuration for the subscription renewer.
#[derive(Debug, Clone)]
pub struct SubscriptionRenewerConfig {
    /// Cron expression (with seconds) describing the renewal schedule.
    pub cron_expression: String,
    /// Timeout applied to a single renewal.
    pub job_timeout: Duration,
    /// Timeout for starting the underlying scheduler.
    pub start_timeout: Duration,
    /// Timeout for stopping the scheduler.
    pub stop_timeout: Duration,
}

impl Default for SubscriptionRenewerConfig {
    fn default() -> Self {
        Self {
            cron_expression: "0 */30 * * * *".into(), // every 30 minutes
            job_timeout: Duration::from_secs(60),
            start_timeout: Duration::from_secs(5),
            stop_timeout: Duration::from_secs(5),
        }
    }
}

/// Check that `cron_expression` fires at least once per subscription window.
///
/// Gaps are measured over the upcoming week of occurrences.
///
/// # Errors
/// `InvalidSchedule` when the expression does not parse, never fires, or
/// leaves a gap as long as the window.
pub fn check_renewal_schedule(cron_expression: &str, now: DateTime<Utc>) -> SchedulerResult<()> {
    let invalid = |reason: String| SchedulerError::InvalidSchedule {
        expression: cron_expression.to_string(),
        reason,
    };

    let cron = Cron::new(cron_expression)
        .with_seconds_optional()
        .parse()
        .map_err(|err| invalid(err.to_string()))?;

    let window = ChronoDuration::seconds(SUBSCRIPTION_TTL_SECS);
    let horizon = now + ChronoDuration::days(7);

    let mut previous = now;
    for _ in 0..MAX_INSPECTED_TICKS {
        let next = cron
            .find_next_occurrence(&previous, false)
            .map_err(|err| invalid(err.to_string()))?;
        if next - previous >= window {
            return Err(invalid(format!(
                "gap of {} minutes reaches the {} minute expiry window",
                (next - previous).num_minutes(),
                window.num_minutes()
            )));
        }
        if next > horizon {
            break;
        }
        previous = next;
    }

    Ok(())
}

/// Subscription renewal scheduler with explicit lifecycle management.
///
/// Dropping a running renewer cancels it: pending ticks become no-ops and
/// the scheduler is shut down in the background.
pub struct SubscriptionRenewer {
    scheduler: Option<JobScheduler>,
    config: SubscriptionRenewerConfig,
    cancellation: CancellationToken,
    manager: Arc<SubscriptionManager>,
    current: Arc<Mutex<Subscription>>,
}

impl SubscriptionRenewer {
    /// Create a renewer with the default configuration and the given schedule.
    pub fn new(
        cron_expression: String,
        manager: Arc<SubscriptionManager>,
        subscription: Subscription,
    ) -> Self {
        let config = SubscriptionRenewerConfig { cron_expression, ..Default::default() };
        Self::with_config(config, manager, subscription)
    }

    /// Create a renewer with a custom configuration.
    pub fn with_config(
        config: SubscriptionRenewerConfig,
        manager: Arc<SubscriptionManager>,
        subscription: Subscription,
    ) -> Self {
        Self {
            scheduler: None,
            config,
            cancellation: CancellationToken::new(),
            manager,
            current: Arc::new(Mutex::new(subscription)),
        }
    }

    /// Snapshot of the subscription as last registered or renewed.
    pub async fn current(&self) -> Subscription {
        self.current.lock().await.clone()
    }

    /// Validate the schedule and start the scheduler.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        check_renewal_schedule(&self.config.cron_expression, Utc::now())?;

        self.cancellation = CancellationToken::new();

        let scheduler_instance = self.build_scheduler().await?;
        let start_timeout = self.config.start_timeout;

        let start_result = tokio::time::timeout(start_timeout, scheduler_instance.start())
            .await
            .map_err(|source| SchedulerError::Timeout { duration: start_timeout, source })?;

        start_result.map_err(|source| SchedulerError::StartFailed { source })?;

        self.scheduler = Some(scheduler_instance);
        info!(cron = %self.config.cron_expression, "Subscription renewer started");
        Ok(())
    }

    /// Stop the scheduler.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        let Some(mut scheduler) = self.scheduler.take() else {
            return Err(SchedulerError::NotRunning);
        };

        self.cancellation.cancel();

        let stop_timeout = self.config.stop_timeout;
        let stop_result =
            tokio::time::timeout(stop_timeout, async move { scheduler.shutdown().await })
                .await
                .map_err(|source| SchedulerError::Timeout { duration: stop_timeout, source })?;

        stop_result.map_err(|source| SchedulerError::StopFailed { source })?;

        info!("Subscription renewer stopped");
        Ok(())
    }

    /// Returns true when a scheduler instance is active.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_some()
    }

    async fn build_scheduler(&self) -> SchedulerResult<JobScheduler> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|source| SchedulerError::CreationFailed { source })?;
        let cron_expr = self.config.cron_expression.clone();
        let manager = self.manager.clone();
        let current = self.current.clone();
        let cancel = self.cancellation.clone();
        let job_timeout = self.config.job_timeout;

        let job_definition = Job::new_async(cron_expr.as_str(), move |_id, _lock| {
            let manager = manager.clone();
            let current = current.clone();
            let cancel = cancel.clone();

            Box::pin(async move {
                if cancel.is_cancelled() {
                    debug!("Renewer cancelled, skipping tick");
                    return;
                }

                let started = Instant::now();
                let renewal = Self::renew_once(&manager, &current, Utc::now());

                match tokio::time::timeout(job_timeout, renewal).await {
                    Ok(Ok(())) => {
                        let elapsed_ms = started.elapsed().as_millis() as u64;
                        debug!(elapsed_ms, "Renewal finished");
                    }
                    Ok(Err(err)) => {
                        error!(error = %err, "Subscription renewal failed");
                    }
                    Err(_) => {
                        let timeout_secs = job_timeout.as_secs();
                        warn!(timeout_secs, "Subscription renewal timed out");
                    }
                }
            })
        })
        .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;

        let job_id = job_definition.guid();
        scheduler
            .add(job_definition)
            .await
            .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;

        debug!(cron = %self.config.cron_expression, job_id = %job_id, "Registered renewal job");
        Ok(scheduler)
    }

    /// Renew the held subscription, or register a fresh one once the old one
    /// has expired and can no longer be renewed.
    async fn renew_once(
        manager: &SubscriptionManager,
        current: &Mutex<Subscription>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let mut subscription = current.lock().await;

        if subscription.is_expired(now) {
            warn!(
                subscription_id = subscription.id.as_deref().unwrap_or_default(),
                expired = %subscription.expiration_date_time,
                "Subscription expired before renewal, registering a new one"
            );
            *subscription = manager.create(now).await?;
            return Ok(());
        }

        let mut renewed = manager.renew(&subscription, now).await?;
        if renewed.id.is_none() {
            renewed.id = subscription.id.clone();
        }
        *subscription = renewed;
        Ok(())
    }
}

impl Drop for SubscriptionRenewer {
    fn drop(&mut self) {
        let Some(mut scheduler) = self.scheduler.take() else {
            return;
        };

        warn!("SubscriptionRenewer dropped while running; cancelling renewals");
        self.cancellation.cancel();

        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            runtime.spawn(async move {
                if let Err(err) = scheduler.shutdown().await {
                    warn!(error = %err, "Failed to shut down dropped renewal scheduler");
                }
            });
        }
    }
}
