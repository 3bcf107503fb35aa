//! Bearer-token acquisition for the graph provider

pub mod credentials;

pub use credentials::{credential_provider, ClientCredentialsProvider, StaticTokenProvider};
