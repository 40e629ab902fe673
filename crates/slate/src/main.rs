//! Slate server binary: CLI, logging setup, database bootstrap.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use slate_server::ServerConfig;
use slate_store::BoardStore;

mod seed;

/// Kanban task-tracking backend.
#[derive(Parser)]
#[command(name = "slate", version, about)]
struct Cli {
    /// Path to the `SQLite` database (default: `~/.slate/slate.db`).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server.
    Serve {
        /// Host to bind.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to bind.
        #[arg(long, default_value_t = 4000)]
        port: u16,
    },
    /// Populate the board with demo tasks.
    Seed {
        /// Seed even if the board already has tasks.
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let db_path = cli.db.unwrap_or_else(default_db_path);
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let store = Arc::new(BoardStore::open(&db_path)?);
    info!(path = %db_path.display(), "database opened");

    match cli.command {
        Command::Serve { host, port } => {
            let config = ServerConfig { host, port };
            slate_server::serve(&config, store).await?;
        }
        Command::Seed { force } => {
            seed::run(&store, force)?;
        }
    }

    Ok(())
}

fn default_db_path() -> PathBuf {
    dirs_home().join(".slate").join("slate.db")
}

fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}
