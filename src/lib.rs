//! Difficalc - Difficulty and Performance Calculation Backend
//!
//! HTTP backend for osu! and osu!droid difficulty and performance
//! calculation. Components declare themselves to an explicit registry and
//! are wired through a token-keyed dependency container; handler groups are
//! then assembled into routes guarded by ordered interceptor chains.
//!
//! # Architecture
//!
//! - **Registry / Container**: component catalog and singleton wiring
//! - **Routing**: route tables and their assembly into an axum router
//! - **Middleware**: parameter bag, interceptor chain, auth and validators
//! - **Handlers**: handler groups (thin layer)
//! - **Services**: business logic, reported through the result envelope
//! - **Clients / Repositories**: osu! API, calculation engine, Postgres, Redis

pub mod app;
pub mod clients;
pub mod config;
pub mod constants;
pub mod container;
pub mod db;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod registry;
pub mod routing;
pub mod services;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use envelope::OperationResult;
pub use error::{AppError, AppResult};
