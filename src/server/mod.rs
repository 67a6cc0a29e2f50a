//! HTTP surface: routes, shared state, static files and shutdown.

mod error;
mod handlers;

use std::any::Any;
use std::sync::Arc;

use axum::Router;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use handlers::{SessionParams, SwitchAgentBody};

use crate::Result;
use crate::agents::AgentRegistry;
use crate::config::Config;
use crate::gateway::Gateway;
use crate::transport::{RealtimeRestAdapter, SessionApi};

#[derive(Clone)]
pub struct AppState {
    pub gateway: Gateway,
}

impl AppState {
    #[must_use]
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Wires the real upstream adapter from `config`.
    ///
    /// # Errors
    /// Returns an error if the upstream client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api = RealtimeRestAdapter::new_with_options(
            config.openai_api_key.as_deref(),
            &config.openai_base_url,
            config.upstream_timeout,
        )?;
        Ok(Self::with_api(config, Arc::new(api)))
    }

    /// Builds state around any [`SessionApi`] implementation.
    #[must_use]
    pub fn with_api(config: &Config, api: Arc<dyn SessionApi>) -> Self {
        let gateway = Gateway::new(
            Arc::new(AgentRegistry::new()),
            api,
            config.menu_data_path.clone(),
            config.openai_configured(),
        );
        Self::new(gateway)
    }
}

/// Builds the application router.
///
/// Anything not matched by an API route is looked up under the static
/// directory; `/` serves its `index.html`.
pub fn router(state: AppState, config: &Config) -> Router {
    let expose_panics = config.is_development();
    let static_dir = &config.static_dir;

    Router::new()
        .route("/api/menu-data", get(handlers::menu_data))
        .route("/api/agent/{agent_type}", get(handlers::agent_config))
        .route("/api/session", post(handlers::create_session))
        .route("/session", get(handlers::create_session_with_config))
        .route("/api/switch-agent", post(handlers::switch_agent))
        .route("/api/switch-agent/{agent_type}", post(handlers::switch_agent_config))
        .route("/api/health", get(handlers::health))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/resources", ServeDir::new(static_dir.join("resources")))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CatchPanicLayer::custom(move |panic: Box<dyn Any + Send + 'static>| {
            panic_response(&*panic, expose_panics)
        }))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn panic_response(panic: &(dyn Any + Send), expose: bool) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(detail, "handler panicked");
    ApiError::internal(detail, expose).into_response()
}

/// Serves until `shutdown` resolves, then stops accepting and drains in-flight requests.
///
/// # Errors
/// Returns an error if the listener fails.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    tracing::info!("Server closed");
    Ok(())
}

/// Resolves on the first SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, shutting down gracefully"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down gracefully"),
    }
}
