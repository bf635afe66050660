//! Gang NPC Manager engine - Main entry point.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gangnpc_engine::api;
use gangnpc_engine::infrastructure::config::{CorsOrigins, EngineConfig};
use gangnpc_engine::infrastructure::sqlite::SqliteDatabase;
use gangnpc_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may run from `crates/engine`).
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gangnpc_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Gang NPC Manager engine");

    let config = EngineConfig::from_env();

    let catalog = config.load_faction_catalog()?;
    match &config.faction_catalog_path {
        Some(path) => tracing::info!(path = %path.display(), "Loaded faction catalog override"),
        None => tracing::info!("Using built-in faction catalog"),
    }

    tracing::info!(path = %config.database_path, "Opening SQLite database");
    let db = SqliteDatabase::connect(&config.database_path).await?;

    let app = Arc::new(App::new(&db, catalog));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(&config.cors_origins) {
        router = router.layer(cors);
    }

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer(origins: &CorsOrigins) -> Option<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    match origins {
        CorsOrigins::Disabled => None,
        CorsOrigins::Any => Some(cors.allow_origin(Any)),
        CorsOrigins::List(list) => {
            let origins: Vec<HeaderValue> = list
                .iter()
                .filter_map(|s| HeaderValue::from_str(s).ok())
                .collect();
            if origins.is_empty() {
                tracing::warn!("No valid CORS origins configured, CORS disabled");
                return None;
            }
            Some(cors.allow_origin(origins))
        }
    }
}
