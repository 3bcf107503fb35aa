//! # ReviewBot API
//!
//! HTTP surface and application wiring: the axum router, the application
//! context that assembles core services over infra adapters, and logging
//! setup for the `reviewbot` binary.

pub mod context;
pub mod routes;
pub mod utils;

pub use context::AppContext;
pub use routes::router;
