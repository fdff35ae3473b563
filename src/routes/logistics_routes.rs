use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::logistics_controller::LogisticsController;
use crate::dto::logistics_dto::{LogisticsRequest, LogisticsResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_logistics_router() -> Router<AppState> {
    Router::new()
        .route("/:route_id/logistics", get(list_logistics))
        .route("/:route_id/logistics", post(create_logistics))
        .route("/:route_id/logistics/:logistics_id", put(update_logistics))
        .route(
            "/:route_id/logistics/:logistics_id",
            delete(delete_logistics),
        )
}

async fn list_logistics(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
) -> Result<Json<Vec<LogisticsResponse>>, AppError> {
    let controller = LogisticsController::new(state.pool.clone());
    let response = controller.list(route_id).await?;
    Ok(Json(response))
}

async fn create_logistics(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
    Json(request): Json<LogisticsRequest>,
) -> Result<(StatusCode, Json<LogisticsResponse>), AppError> {
    let controller = LogisticsController::new(state.pool.clone());
    let response = controller.create(route_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_logistics(
    State(state): State<AppState>,
    Path((route_id, logistics_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<LogisticsRequest>,
) -> Result<Json<LogisticsResponse>, AppError> {
    let controller = LogisticsController::new(state.pool.clone());
    let response = controller.update(logistics_id, route_id, request).await?;
    Ok(Json(response))
}

async fn delete_logistics(
    State(state): State<AppState>,
    Path((route_id, logistics_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = LogisticsController::new(state.pool.clone());
    controller.delete(logistics_id, route_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Logistics item deleted successfully"
    })))
}
