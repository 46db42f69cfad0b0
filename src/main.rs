// src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use cookbook::ServerConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "cookbook")]
#[command(author, version, about = "Recipe book HTTP API with SQLite storage", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the cookbook database
    Init {
        /// Database path
        #[arg(short, long, default_value = "cookbook.db")]
        db_path: PathBuf,
    },
    /// Start the HTTP server
    Serve {
        /// Address to bind to
        #[arg(short, long, default_value = "0.0.0.0:8080")]
        bind: SocketAddr,
        /// Database path
        #[arg(short, long, default_value = "cookbook.db")]
        db_path: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { db_path } => {
            info!("Initializing cookbook database at: {}", db_path.display());
            cookbook::db::init(&db_path)?;
            println!("Database initialized successfully at: {}", db_path.display());
            Ok(())
        }
        Commands::Serve { bind, db_path } => {
            let config = ServerConfig::default()
                .with_bind_addr(bind)
                .with_db_path(db_path);

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(cookbook::run_server(config))?;
            Ok(())
        }
    }
}
