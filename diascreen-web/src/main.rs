//! diascreen-web - authenticated diabetic screening service
//!
//! Accepts an uploaded image behind a login, runs the pre-trained binary
//! classifier over it, and renders the textual prediction.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use diascreen_common::config;
use diascreen_common::db::init_database;
use diascreen_web::infer::Classifier;
use diascreen_web::{build_router, AppState};

/// Default listen port
const DEFAULT_PORT: u16 = 5210;

/// Command-line options
#[derive(Debug, Parser)]
#[command(name = "diascreen-web", version)]
struct Cli {
    /// Root folder holding the database and model artifact
    #[arg(long)]
    root_folder: Option<String>,

    /// Listen port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber before anything else can log
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting DiaScreen web service (diascreen-web) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let cli = Cli::parse();

    let root_folder = config::resolve_root_folder(cli.root_folder.as_deref());
    config::ensure_root_folder(&root_folder)?;
    info!("Root folder: {}", root_folder.display());

    let db_path = config::database_path(&root_folder);
    let pool = match init_database(&db_path).await {
        Ok(pool) => {
            info!("✓ Database ready: {}", db_path.display());
            pool
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    // The classifier loads before the listener binds; serving without a
    // model is not an option.
    let model_path = config::model_path(&root_folder);
    let classifier = match Classifier::load(&model_path) {
        Ok(classifier) => {
            info!("✓ Loaded classifier: {}", model_path.display());
            Arc::new(classifier)
        }
        Err(e) => {
            error!("Failed to load model artifact: {}", e);
            return Err(e.into());
        }
    };

    // Create application state and router
    let state = AppState::new(pool, classifier);
    let app = build_router(state);

    let addr = format!("127.0.0.1:{}", cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("diascreen-web listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
