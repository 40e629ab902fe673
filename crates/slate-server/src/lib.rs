//! # slate-server
//!
//! Axum HTTP API for the Slate board.
//!
//! - REST endpoints for task CRUD, moves and bulk reorder under `/api`
//! - `/health` and Prometheus `/metrics`
//! - CORS + request tracing layers
//! - Engine failures map to stable error codes via [`error::ApiError`]
//!
//! The server validates transport-level input (column values, identifier
//! format, JSON shape) and delegates everything else to
//! [`slate_store::BoardStore`].

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod metrics;
pub mod server;

pub use config::ServerConfig;
pub use server::{AppState, router, serve};
