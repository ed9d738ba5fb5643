//! HTTP surface: routing, authentication and the server loop.
//!
//! Public routes (`/`, `/apidocs`) are served as-is. Everything else sits
//! behind [`auth::require_api_key`].

pub mod apidocs;
pub mod auth;
pub mod extract;
pub mod handlers;

use crate::config::ApiKey;
use crate::db::ChoreStore;
use axum::{Router, middleware, routing::get};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ChoreStore>,
    /// Configured secret. `None` rejects every protected request.
    pub api_key: Option<Arc<ApiKey>>,
}

impl AppState {
    pub fn new(store: Arc<dyn ChoreStore>, api_key: Option<ApiKey>) -> Self {
        Self {
            store,
            api_key: api_key.map(Arc::new),
        }
    }
}

/// Build the full routing table.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/chores", get(handlers::list_chores))
        .route("/chores/:name", get(handlers::list_chores_by_name))
        .route("/chores/:name/date/*date", get(handlers::get_chore_on_date))
        .route("/names", get(handlers::list_names))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .route("/", get(handlers::index))
        .route("/apidocs", get(apidocs::apidocs))
        .merge(protected)
        .with_state(state)
}

/// Serve the API on an already-bound listener until `shutdown` resolves.
pub async fn run_http_server<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state);

    if let Ok(addr) = listener.local_addr() {
        tracing::info!("HTTP server listening on {}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
