use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tokio::sync::Mutex;
use tracing::info;

use crate::{api, spotify::IdentityProvider, types::PkceToken};

/// Path of the OAuth redirect route, on both the web server and the
/// temporary callback server.
pub const CALLBACK_PATH: &str = "/redirect";

pub fn router(state: api::AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/login", get(api::login))
        .route(CALLBACK_PATH, get(api::redirect))
        .route("/logout", get(api::logout))
        .route("/saveDiscoverWeekly", post(api::save_discover_weekly))
        .route("/get_playlists", get(api::get_playlists))
        .route("/health", get(api::health))
        .with_state(state)
}

pub async fn start_api_server(state: api::AppState) -> std::io::Result<()> {
    let addr = parse_addr(&state.config.server_addr)?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, router(state)).await
}

/// Serves only the redirect route, for the command line authorization flow.
pub async fn start_callback_server(
    server_addr: &str,
    state: Arc<Mutex<Option<PkceToken>>>,
    provider: Arc<dyn IdentityProvider>,
) -> std::io::Result<()> {
    let app = Router::new()
        .route(CALLBACK_PATH, get(api::callback))
        .layer(Extension(state))
        .layer(Extension(provider));

    let addr = parse_addr(server_addr)?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await
}

fn parse_addr(server_addr: &str) -> std::io::Result<SocketAddr> {
    SocketAddr::from_str(server_addr)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
}
