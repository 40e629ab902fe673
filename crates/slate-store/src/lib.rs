//! # slate-store
//!
//! SQLite-backed task store and the board ordering engine.
//!
//! - [`sqlite::connection`] — r2d2 connection pool with WAL and pragmas
//! - [`sqlite::migrations`] — embedded schema migrations
//! - [`sqlite::repo::TaskRepo`] — stateless row-level operations
//! - [`store::BoardStore`] — the ordering engine: transactional operations
//!   that keep every column's positions dense and unique
//! - [`errors::BoardError`] — the error taxonomy shared with the server
//!
//! ## Crate Position
//!
//! Depends on `slate-core` for domain types. Consumed by the server and the
//! binary; transport concerns never reach this crate.

#![deny(unsafe_code)]

pub mod errors;
pub mod sqlite;
pub mod store;

pub use errors::{BoardError, Result};
pub use sqlite::connection::{ConnectionConfig, ConnectionPool, PooledConnection};
pub use store::BoardStore;
