use std::path::PathBuf;

use api_rest::{AppState, build_router};
use intake_core::config::store_kind_from_env_value;
use intake_core::constants::DEFAULT_DATA_DIR;
use intake_core::{CoreConfig, IntakeError, SubmissionPipeline, store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the intake service
///
/// Serves the intake form over HTTP.
///
/// # Environment Variables
/// - `INTAKE_ADDR`: Server address (default: "0.0.0.0:5000")
/// - `INTAKE_DATA_DIR`: Directory for record storage (default: "intake_data")
/// - `INTAKE_STORE`: Store backend, `file` or `memory` (default: "file")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the store kind is not recognised or the data directory does not exist,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("intake_run=info".parse()?)
                .add_directive("intake_core=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("INTAKE_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".into());
    let data_dir = PathBuf::from(
        std::env::var("INTAKE_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into()),
    );
    let store_kind = store_kind_from_env_value(std::env::var("INTAKE_STORE").ok())?;

    let cfg = match CoreConfig::new(data_dir, store_kind) {
        Ok(cfg) => cfg,
        Err(IntakeError::MissingDataDir(path)) => {
            anyhow::bail!("Data directory does not exist: {}", path.display());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        "++ Starting intake service on {} ({} store, data dir {})",
        addr,
        cfg.store_kind(),
        cfg.data_dir().display()
    );

    let pipeline = SubmissionPipeline::new(store::open(&cfg));
    let app = build_router(AppState::new(pipeline));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
