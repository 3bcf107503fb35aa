//! Change-notification subscription lifecycle

pub mod manager;

pub use manager::SubscriptionManager;
