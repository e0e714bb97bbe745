use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod form;
pub mod handlers;
pub mod middleware;
pub mod testing;

use database::catalog::Catalog;

/// Shared application state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn Catalog>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public service endpoints
        .route("/", get(root))
        .route("/health", get(health))
        // Catalog API
        .merge(variant_routes())
        // Global middleware
        .layer(axum::middleware::from_fn(middleware::principal_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn variant_routes() -> Router<AppState> {
    use handlers::variants;

    Router::new()
        // Collection operations
        .route(
            "/api/:store_id/products/:product_id/variants",
            get(variants::variant_list).post(variants::variant_create),
        )
        // Item operations
        .route(
            "/api/:store_id/products/:product_id/variants/:variant_id",
            get(variants::variant_read)
                .patch(variants::variant_update)
                .delete(variants::variant_delete),
        )
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Catalog Admin API",
            "version": version,
            "description": "Admin backend for multi-tenant storefront catalog management",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "variants": "/api/:storeId/products/:productId/variants[/:variantId] (mutations require bearer token)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.catalog.health().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
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
