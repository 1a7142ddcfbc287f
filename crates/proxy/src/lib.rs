pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::{path::Path, sync::Arc};

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use crate::{
    config::Config,
    error::ProxyError,
    routes::{create_user_handler, list_users_handler, login_handler, register_handler},
    state::ProxyState,
};

/// Proxy router; `static_dir` is served for every path outside `/api`.
pub fn app(state: Arc<ProxyState>, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let api = Router::new()
        .route("/api/login", post(login_handler))
        .route("/api/register", post(register_handler))
        .route("/api/users", get(list_users_handler).post(create_user_handler));

    let router = match static_dir {
        Some(dir) => {
            let index = ServeFile::new(dir.join("index.html"));
            api.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => api,
    };

    router.layer(cors).with_state(state)
}

/// # Errors
///
/// Fails on bad configuration or when the listener cannot bind.
pub async fn start_server() -> Result<(), ProxyError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load()?;
    let state = ProxyState::new(&config);
    let app = app(state, config.static_dir.as_deref());

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!(
        "Proxy listening on {address}, forwarding to {}",
        config.backend_url
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Proxy stopped");
    Ok(())
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install terminate handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
