// src/server/mod.rs
//! Cookbook HTTP server
//!
//! This module provides the HTTP surface of the service:
//! - Recipe CRUD endpoints under `/recipes`
//! - Schema creation at startup
//! - A catch-all layer converting panics into an opaque 500
//!
//! Each request handler opens its own database connection, scoped to the
//! request, and runs mutating sequences inside a single transaction.

mod handlers;
mod routes;

pub use routes::create_router;

use crate::db;
use crate::error::Result;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,
    /// Path to the cookbook database
    pub db_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".parse().unwrap(),
            db_path: PathBuf::from("cookbook.db"),
        }
    }
}

impl ServerConfig {
    /// Create a new configuration with a custom database path
    pub fn with_db_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.db_path = path.into();
        self
    }

    /// Set the bind address
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }
}

/// Shared server state
pub struct ServerState {
    pub config: ServerConfig,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Open a database connection
    ///
    /// Creates a new connection scoped to the current request. This should
    /// be called from within `spawn_blocking` in async handlers.
    pub fn open_db(&self) -> Result<rusqlite::Connection> {
        db::open(&self.config.db_path)
    }
}

/// Start the cookbook server
pub async fn run_server(config: ServerConfig) -> Result<()> {
    tracing::info!("Starting cookbook server on {}", config.bind_addr);
    tracing::info!("Database: {:?}", config.db_path);

    // Create the schema on startup if absent
    db::init(&config.db_path)?;

    let state = Arc::new(ServerState::new(config.clone()));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Cookbook is ready to serve");

    axum::serve(listener, app).await?;
    Ok(())
}
