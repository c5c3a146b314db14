//! Axum server setup
//!
//! Server skeleton with:
//! - `/get-news` open to any origin
//! - Localhost-only CORS on `/api` and `/admin` by default
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use leaguectl_core::config::ServerSection;
use leaguectl_core::League;

use super::routes;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3030)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS on `/api` and `/admin` (default: false = localhost only)
    ///
    /// WARNING: this opens the admin mutations to any origin.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
            cors_permissive: false,
        }
    }
}

impl From<&ServerSection> for ServerConfig {
    fn from(section: &ServerSection) -> Self {
        Self {
            bind_addr: section.bind,
            cors_permissive: section.cors_permissive,
        }
    }
}

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    pub league: League,
}

fn local_cors(permissive: bool) -> CorsLayer {
    if permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://localhost:3030"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
            HeaderValue::from_static("http://127.0.0.1:3030"),
        ])
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Assemble every route over one league handle.
pub fn build_router(league: League, cors_permissive: bool) -> Router {
    let restricted = Router::new()
        .merge(routes::api::router())
        .merge(routes::admin::router())
        .layer(local_cors(cors_permissive));

    Router::new()
        .merge(routes::health::router())
        .merge(routes::news::router())
        .merge(restricted)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(AppState { league }))
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let store = open_store(&config.store).await?;
/// run_server(League::new(store), ServerConfig::from(&config.server)).await?;
/// ```
pub async fn run_server(league: League, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(league, config.cors_permissive);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 3030);
        assert!(!config.cors_permissive);
    }

    #[test]
    fn config_from_section() {
        let section = ServerSection {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_permissive: true,
        };
        let config = ServerConfig::from(&section);
        assert_eq!(config.bind_addr.port(), 8080);
        assert!(config.cors_permissive);
    }
}
