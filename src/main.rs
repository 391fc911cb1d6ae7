use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use triage_core::{CoreConfig, DEFAULT_REST_ADDR, config::data_dir_from_env_value};

/// Main entry point for the triage application
///
/// Loads `.env`, validates the reference tables and serves the REST API with Swagger UI.
/// Any table problem stops startup before the listener is bound.
///
/// # Environment Variables
/// - `TRIAGE_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `TRIAGE_DATA_DIR`: Directory whose YAML tables replace the embedded ones (optional)
/// - `RUST_LOG`: Extra tracing directives
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If table loading, binding or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("triage_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("triage_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("TRIAGE_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());
    let cfg = CoreConfig::new(data_dir_from_env_value(std::env::var("TRIAGE_DATA_DIR").ok()))?;

    let state = AppState::load(&cfg)?;
    tracing::info!(
        "++ Loaded {} diseases in {} languages",
        state.predictions.diseases().len(),
        state.predictions.languages().len()
    );

    tracing::info!("++ Starting triage REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
