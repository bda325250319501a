use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{EnvFilter, fmt};

use admin_console::shared::infrastructure::remote_store::in_memory::InMemoryRemoteStore;
use admin_console::shell::config::ConsoleConfig;
use admin_console::shell::http::router;
use admin_console::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = ConsoleConfig::from_env()?;

    // In-memory store for now
    let store = Arc::new(
        InMemoryRemoteStore::new()
            .with_table("admins", "admin_id", [])
            .with_table("users", "user_id", [])
            .with_table("reviews", "review_id", [])
            .with_table(&config.join_schema.primary_table, "id", [])
            .with_table(&config.join_schema.sale_table, "id", [])
            .with_table(&config.join_schema.product_table, "id", []),
    );

    let state = AppState::new(store, &config);
    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!(addr = %config.bind_addr, scope = %config.scope, "admin console listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
