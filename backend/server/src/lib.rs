//! Feedback collection service.
//!
//! Accepts ratings and comments over a small JSON API, keeps them in one flat file,
//! lists them newest first and exports them as CSV.
//!
//!
//!
//! # API
//!
//! | Method | Path | Behavior |
//! |---|---|---|
//! | GET | `/api/feedback` | List feedback, `{ok, data}` |
//! | POST | `/api/feedback` | Create feedback, `{ok, item}` with 201 |
//! | DELETE | `/api/feedback/{id}` | Delete by id, `{ok}` or 404 |
//! | GET | `/api/export` | CSV download |
//! | GET | `/*` | Static files from the public directory |
//!
//! Every other method/path pair under `/api/` answers 404 `{ok: false, error: "API route not found"}`.
//! The bare `/api` path is not API space and falls through to the static files.
//!
//!
//!
//! # Configuration
//!
//! - `PORT` listen port, default `3000`
//! - `DATA_FILE` persisted collection, default `data/feedback.json`
//! - `PUBLIC_DIR` static asset root, default `public`
//! - `RUST_LOG` log filter, e.g. `RUST_LOG=server=debug,tower_http=debug`
//!
//!
//!
//! # Notes
//!
//! The whole collection is rewritten on every create and delete. Fine for a feedback form,
//! an append-only log or embedded key-value store would be the next step for anything larger.
use std::sync::Arc;

use axum::{
    Router,
    routing::{any, delete, get},
};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod assets;
pub mod config;
pub mod error;
pub mod export;
pub mod feedback;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;

use config::Config;
use routes::{api_not_found, create_feedback, delete_feedback, export_feedback, list_feedback};
use state::State;

pub fn app(state: Arc<State>) -> Router {
    let assets = assets::router(&state.config.public_dir);

    Router::new()
        .route(
            "/api/feedback",
            get(list_feedback)
                .post(create_feedback)
                .fallback(api_not_found),
        )
        .route(
            "/api/feedback/{id}",
            delete(delete_feedback).fallback(api_not_found),
        )
        .route("/api/export", get(export_feedback).fallback(api_not_found))
        .route("/api/", any(api_not_found))
        .route("/api/{*rest}", any(api_not_found))
        .with_state(state)
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
}

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = State::new(config).await?;

    info!("Starting server...");
    let address = state.config.address();
    let app = app(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Feedback app running on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
