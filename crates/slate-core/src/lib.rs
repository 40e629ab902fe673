//! # slate-core
//!
//! Foundation types for the Slate board backend.
//!
//! This crate provides the shared vocabulary the store and server crates
//! depend on:
//!
//! - **Columns**: [`Column`] — the three fixed task-status buckets
//! - **Branded IDs**: [`TaskId`] as a validated `task-{uuid}` newtype
//! - **Domain types**: [`Task`], the mutation param structs, and [`Board`]
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other slate crates.

#![deny(unsafe_code)]

pub mod column;
pub mod ids;
pub mod task;

pub use column::{Column, UnknownColumn};
pub use ids::{InvalidTaskId, TaskId};
pub use task::{
    Board, MIN_TITLE_LEN, MoveTaskParams, ReorderEntry, Task, TaskCreateParams, TaskUpdateParams,
};
