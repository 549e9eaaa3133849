pub mod auth;
pub mod client;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod validation;
pub mod workspace;

use axum::{
    extract::State,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::database::Database;

/// Shared application state, constructed once at process start and handed to
/// every handler by reference.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// Build the full router: service banner, health probe, and one POST route
/// per callable operation, all callables behind the identity middleware.
pub fn app(state: AppState) -> Router {
    let callables = Router::new()
        .route("/call/createText", post(handlers::texts::create_text))
        .route("/call/getTexts", post(handlers::texts::get_texts))
        .route("/call/updateText", post(handlers::texts::update_text))
        .route("/call/deleteText", post(handlers::texts::delete_text))
        .route("/call/createComment", post(handlers::comments::create_comment))
        .route("/call/getComments", post(handlers::comments::get_comments))
        .route("/call/deleteComment", post(handlers::comments::delete_comment))
        .route_layer(axum_middleware::from_fn(middleware::identity_auth_middleware));

    let mut router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(callables);

    if config::config().security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Textboard API",
            "version": version,
            "description": "Workspace-scoped texts & comments backend (Axum)",
            "callables": {
                "texts": ["createText", "getTexts", "updateText", "deleteText"],
                "comments": ["createComment", "getComments", "deleteComment"],
            },
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "call": "/call/:name (identity token required)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match state.db.health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
