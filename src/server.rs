//! HTTP front end: binds the listener and upgrades each route to its endpoint.

use std::sync::Arc;

use axum::{
    Router,
    extract::{State, WebSocketUpgrade},
    http::Uri,
    response::Response,
    routing::get,
};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::endpoints::{Session, Variant};
use crate::error::{AudioWsError, Result};
use crate::streaming::StreamError;

/// Build the router serving every path in [`Variant::ROUTES`].
pub fn router(config: Arc<ServerConfig>) -> Router {
    let mut router = Router::new();
    for (path, variant) in Variant::ROUTES {
        router = router.route(
            path,
            get(
                move |ws: WebSocketUpgrade, uri: Uri, State(config): State<Arc<ServerConfig>>| async move {
                    accept(variant, ws, uri, config)
                },
            ),
        );
    }
    router.with_state(config)
}

fn accept(variant: Variant, ws: WebSocketUpgrade, uri: Uri, config: Arc<ServerConfig>) -> Response {
    let session = Session::new(variant);
    session.span().in_scope(|| tracing::info!(%uri, "upgrade requested"));

    let on_failure = session.clone();
    ws.on_failed_upgrade(move |error: axum::Error| {
        on_failure.upgrade_failed(&StreamError::Upgrade(error.to_string()));
    })
    .on_upgrade(move |socket| async move {
        session.stream(socket, &config).await;
    })
}

/// Bind `config.bind_addr` and serve until the process stops.
///
/// Session failures are contained in their session; only an invalid configuration
/// or a listener that cannot be bound is returned as an error.
pub async fn serve(config: ServerConfig) -> Result<()> {
    config.validate()?;

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|source| AudioWsError::Bind {
            addr: config.bind_addr.clone(),
            source,
        })?;
    let local = listener
        .local_addr()
        .map_or_else(|_| config.bind_addr.clone(), |addr| addr.to_string());
    tracing::info!(addr = %local, "start listening at");

    axum::serve(listener, router(Arc::new(config)))
        .await
        .map_err(AudioWsError::Serve)
}
