use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agriburn_api::config::ServerConfig;
use agriburn_api::router::build_app_router;
use agriburn_api::state::AppState;
use agriburn_earthengine::{ComputeBackend, EarthEngineClient};
use agriburn_pipeline::{BoundaryResolver, BurnScarDetector, ResultStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "agriburn_api=debug,agriburn_pipeline=debug,agriburn_earthengine=debug,tower_http=debug".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Earth Engine compute backend ---
    let mut client = EarthEngineClient::new(config.ee_api_url.clone(), config.ee_project.clone());
    if let Some(token) = &config.ee_auth_token {
        client = client.with_auth_token(token.clone());
    }
    let backend: Arc<dyn ComputeBackend> = Arc::new(client);
    tracing::info!(project = %config.ee_project, "Earth Engine client ready");

    // --- App state ---
    let state = AppState {
        boundary: Arc::new(BoundaryResolver::new(Arc::clone(&backend))),
        detector: Arc::new(BurnScarDetector::new(
            Arc::clone(&backend),
            config.landcover_policy,
        )),
        store: Arc::new(ResultStore::new()),
        config: Arc::new(config.clone()),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
