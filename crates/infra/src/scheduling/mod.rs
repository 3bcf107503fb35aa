//! Scheduling infrastructure for background maintenance
//!
//! The only recurring job is the change-subscription renewal. Schedulers have
//! explicit start/stop lifecycle, support cancellation and wrap every async
//! operation in a timeout.

pub mod error;
pub mod subscription_renewer;

pub use error::{SchedulerError, SchedulerResult};
pub use subscription_renewer::{
    check_renewal_schedule, SubscriptionRenewer, SubscriptionRenewerConfig,
};
