use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::segment_controller::SegmentController;
use crate::controllers::stop_controller::StopController;
use crate::dto::segment_dto::{
    CreateSegmentRequest, CreateStopRequest, SegmentOrderItem, SegmentResponse, StopOrderItem,
    StopResponse, UpdateSegmentRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_segment_router() -> Router<AppState> {
    Router::new()
        .route("/:route_id/segments", get(list_segments))
        .route("/:route_id/segments", post(create_segment))
        .route("/:route_id/segments/reorder", put(reorder_segments))
        .route("/:route_id/segments/:segment_id", put(update_segment))
        .route("/:route_id/segments/:segment_id", delete(delete_segment))
        .route("/:route_id/segments/:segment_id/stops", get(list_stops))
        .route("/:route_id/segments/:segment_id/stops", post(create_stop))
        .route(
            "/:route_id/segments/:segment_id/stops/reorder",
            put(reorder_stops),
        )
        .route(
            "/:route_id/segments/:segment_id/stops/:stop_id",
            delete(delete_stop),
        )
}

async fn list_segments(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
) -> Result<Json<Vec<SegmentResponse>>, AppError> {
    let controller = SegmentController::new(state.pool.clone());
    let response = controller.list(route_id).await?;
    Ok(Json(response))
}

async fn create_segment(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
    Json(request): Json<CreateSegmentRequest>,
) -> Result<(StatusCode, Json<SegmentResponse>), AppError> {
    let controller = SegmentController::new(state.pool.clone());
    let response = controller.create(route_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn reorder_segments(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
    Json(items): Json<Vec<SegmentOrderItem>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = SegmentController::new(state.pool.clone());
    controller.reorder(route_id, items).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Segments reordered successfully"
    })))
}

async fn update_segment(
    State(state): State<AppState>,
    Path((route_id, segment_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateSegmentRequest>,
) -> Result<Json<SegmentResponse>, AppError> {
    let controller = SegmentController::new(state.pool.clone());
    let response = controller.update(segment_id, route_id, request).await?;
    Ok(Json(response))
}

async fn delete_segment(
    State(state): State<AppState>,
    Path((route_id, segment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = SegmentController::new(state.pool.clone());
    controller.delete(segment_id, route_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Segment deleted successfully"
    })))
}

async fn list_stops(
    State(state): State<AppState>,
    Path((route_id, segment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<StopResponse>>, AppError> {
    let controller = StopController::new(state.pool.clone());
    let response = controller.list(route_id, segment_id).await?;
    Ok(Json(response))
}

async fn create_stop(
    State(state): State<AppState>,
    Path((route_id, segment_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<CreateStopRequest>,
) -> Result<(StatusCode, Json<StopResponse>), AppError> {
    let controller = StopController::new(state.pool.clone());
    let response = controller.create(route_id, segment_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn reorder_stops(
    State(state): State<AppState>,
    Path((route_id, segment_id)): Path<(Uuid, Uuid)>,
    Json(items): Json<Vec<StopOrderItem>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = StopController::new(state.pool.clone());
    controller.reorder(route_id, segment_id, items).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Stops reordered successfully"
    })))
}

async fn delete_stop(
    State(state): State<AppState>,
    Path((route_id, segment_id, stop_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = StopController::new(state.pool.clone());
    controller.delete(route_id, segment_id, stop_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Stop deleted successfully"
    })))
}
