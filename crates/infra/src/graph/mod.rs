//! Microsoft Graph adapter

pub mod client;
pub mod types;

pub use client::GraphClient;
