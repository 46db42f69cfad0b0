// src/lib.rs

//! Cookbook - recipe book HTTP API
//!
//! A small CRUD service for recipes and their ingredients, backed by SQLite.
//!
//! # Architecture
//!
//! - Database-first: all state in SQLite, schema created at startup
//! - Explicit queries: every query path a handler uses is a named function,
//!   eager JOINs where nested data is needed
//! - Per-request sessions: each handler opens its own connection and runs
//!   mutating sequences inside a single transaction

pub mod db;
mod error;
pub mod server;

pub use error::{Error, Result};
pub use server::{create_router, run_server, ServerConfig, ServerState};
