//! Routers de la API
//!
//! Un router por recurso, todos montados bajo /routes.

pub mod accommodation_routes;
pub mod logistics_routes;
pub mod participant_routes;
pub mod route_routes;
pub mod segment_routes;
pub mod transaction_routes;
pub mod transfer_routes;

use crate::state::AppState;
use axum::{response::Json, routing::get, Router};
use serde_json::json;

/// Armar el router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    let route_planning = Router::new()
        .merge(route_routes::create_route_router())
        .merge(segment_routes::create_segment_router())
        .merge(accommodation_routes::create_accommodation_router())
        .merge(logistics_routes::create_logistics_router())
        .merge(participant_routes::create_participant_router())
        .merge(transfer_routes::create_transfer_router())
        .merge(transaction_routes::create_transaction_router());

    Router::new()
        .route("/health", get(health))
        .nest("/routes", route_planning)
        .with_state(state)
}

/// Health check del servicio
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "tour-logistics",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
