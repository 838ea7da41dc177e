//! PetPals Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::header::HeaderName;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use petpals_engine::api;
use petpals_engine::app::{App, Repositories};
use petpals_engine::infrastructure::{
    clock::SystemClock,
    config::{EngineConfig, StoreKind},
    memory::MemoryRepositories,
    ports::ClockPort,
    sqlite::SqliteRepositories,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be started from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "petpals_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting PetPals Engine");

    let config = EngineConfig::from_env()?;
    tracing::info!(
        store = ?config.store,
        disease_penalty_mode = %config.disease_penalty_mode,
        "Configuration loaded"
    );

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

    let repos: Repositories = match config.store {
        StoreKind::Sqlite => {
            tracing::info!("Opening SQLite database at {}", config.db_path);
            SqliteRepositories::connect(&config.db_path, clock.clone())
                .await?
                .into()
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            MemoryRepositories::new().into()
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    let cors = build_cors_layer(config.cors_allowed_origins.as_deref());

    let app = Arc::new(App::new(repos, clock, config));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = cors {
        router = router.layer(cors);
    }

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
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

fn build_cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins?;

    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        // Clients send X-User-Id and JSON content types, which trigger CORS preflights.
        .allow_headers([
            HeaderName::from_static("x-user-id"),
            axum::http::header::CONTENT_TYPE,
        ]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
