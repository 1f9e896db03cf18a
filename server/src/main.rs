mod api;
mod telemetry;
mod types;

use anyhow::Context;
use flavor_core::ai::{create_client_from_env, AiClient};
use flavor_core::{MemoryRecipeStore, RecipeStore};
use std::env;
use std::sync::Arc;
use utoipa_swagger_ui::SwaggerUi;

/// Address the server binds to unless `FLAVOR_BIND_ADDR` is set.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Shared handles available to every handler.
pub struct AppContext {
    pub store: Arc<dyn RecipeStore>,
    pub ai_client: Arc<dyn AiClient>,
}

/// Application state shared across all handlers
pub type AppState = Arc<AppContext>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        println!("{}", api::openapi().to_pretty_json()?);
        return Ok(());
    }

    let dotenv = dotenvy::dotenv();
    telemetry::init_telemetry();
    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Failed to load .env file: {}", e),
    }

    let ai_client = create_client_from_env().context("Failed to configure the AI client")?;

    let state: AppState = Arc::new(AppContext {
        store: Arc::new(MemoryRecipeStore::new()),
        ai_client,
    });

    let swagger_ui =
        SwaggerUi::new(api::SWAGGER_UI_PATH).url("/api-docs/openapi.json", api::openapi());

    let app = telemetry::with_http_tracing(api::router().merge(swagger_ui).with_state(state));

    let bind_addr = env::var("FLAVOR_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    let local_addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", local_addr);
    tracing::info!(
        "Swagger UI available at http://{}{}/",
        local_addr,
        api::SWAGGER_UI_PATH
    );
    tracing::info!(
        "OpenAPI spec available at http://{}/api-docs/openapi.json",
        local_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
