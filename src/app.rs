use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::database::store::UserStore;
use crate::handlers;

/// Shared per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(store: impl UserStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Build the full router: API, landing page, static assets and layers
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route_service("/", ServeFile::new(&config.server.index_file))
        .nest_service("/public", ServeDir::new(&config.server.static_dir))
        .route("/health", get(handlers::health::get))
        // API
        .merge(api_routes())
        .with_state(state);

    // Global middleware
    if config.api.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn api_routes() -> Router<AppState> {
    use handlers::{exercises, logs, users};

    Router::new()
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/users/:id/exercises", post(exercises::create))
        .route("/api/users/:id/logs", get(logs::get))
}
