//! catalog-web - Library catalog web server
//!
//! Serves the catalog's HTML pages over HTTP, backed by a SQLite database
//! in the resolved root folder.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use catalog_common::config::{
    config_file_path, LoggingConfig, RootFolderInitializer, RootFolderResolver, TomlConfig,
};
use catalog_web::{build_router, AppState, MODULE_NAME};

/// Command-line arguments; each overrides the TOML config file
#[derive(Debug, Parser)]
#[command(name = "catalog-web", version, about = "Library catalog web server")]
struct Args {
    /// Folder holding catalog.db
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// Config file (defaults to <config dir>/catalog/catalog-web.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bind address
    #[arg(long, env = "CATALOG_HOST")]
    host: Option<String>,

    /// HTTP port
    #[arg(long, env = "CATALOG_PORT")]
    port: Option<u16>,
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    // RUST_LOG wins over the configured level
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config decides the log level, so a problem with the default config
    // file is held until the subscriber exists
    let (toml, config_problem) = match &args.config {
        Some(path) => {
            let toml = TomlConfig::load(path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?;
            (toml, None)
        }
        None => TomlConfig::load_or_default_from(config_file_path(MODULE_NAME).as_deref()),
    };

    init_tracing(&toml.logging)?;

    if let Some(e) = config_problem {
        warn!("{} (using defaults)", e);
    }

    info!(
        "Starting library catalog (catalog-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let root_folder = RootFolderResolver::new(MODULE_NAME)
        .with_cli_override(args.root_folder.clone())
        .with_toml(toml.clone())
        .resolve();

    let initializer = RootFolderInitializer::new(root_folder);
    initializer.ensure_directory_exists()?;

    let db_path = initializer.database_path();
    info!("Database path: {}", db_path.display());

    let pool = catalog_web::db::init_database(&db_path).await?;
    info!("✓ Connected to database");

    let state = AppState::new(pool);
    let app = build_router(state);

    let host = args.host.unwrap_or_else(|| toml.host_or_default());
    let port = args.port.unwrap_or_else(|| toml.port_or_default());
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("catalog-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
