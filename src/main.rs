//! Portal Access server.
//!
//! Serves the navigation gate over HTTP for clients that route on their own.

use std::sync::Arc;

use http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, EnvFilter};

use portal_access::adapters::auth::{JwtConfig, JwtSessionLoader};
use portal_access::adapters::http::{app_router, SessionState};
use portal_access::adapters::profile::{RestProfileConfig, RestProfileReader};
use portal_access::config::AppConfig;
use portal_access::domain::access::NavigationGate;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

fn load_configuration() -> Result<AppConfig, BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;
    Ok(config)
}

fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.features.json_logs {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        fmt().with_env_filter(filter).with_target(true).init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .allowed_origins()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn run(config: AppConfig) -> Result<(), BoxError> {
    tracing::info!(
        production = config.server.is_production(),
        "Starting portal-access v{}",
        env!("CARGO_PKG_VERSION")
    );

    let profiles = RestProfileReader::new(
        RestProfileConfig::new(&config.auth.backend_url, config.auth.anon_key.clone())
            .with_timeout(config.auth.request_timeout()),
    )?;
    let loader: SessionState = Arc::new(JwtSessionLoader::new(
        JwtConfig::new(config.auth.jwt_secret.clone(), &config.auth.jwt_audience),
        Arc::new(profiles),
    ));

    let gate = Arc::new(NavigationGate::portal());
    tracing::info!(routes = gate.routes().entries().len(), "Route table loaded");

    let mut app = app_router(gate, loader).layer(
        ServiceBuilder::new()
            .layer(cors_layer(&config))
            .layer(TimeoutLayer::new(config.server.request_timeout())),
    );
    if config.features.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
