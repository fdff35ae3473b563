use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::accommodation_controller::AccommodationController;
use crate::dto::accommodation_dto::{
    AccommodationResponse, CreateAccommodationRequest, CreateRoomRequest, RoomResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_accommodation_router() -> Router<AppState> {
    Router::new()
        .route(
            "/:route_id/segments/:segment_id/accommodations",
            get(list_accommodations),
        )
        .route(
            "/:route_id/segments/:segment_id/accommodations",
            post(create_accommodation),
        )
        .route(
            "/:route_id/segments/:segment_id/accommodations/:accommodation_id",
            delete(delete_accommodation),
        )
        .route(
            "/:route_id/segments/:segment_id/accommodations/:accommodation_id/rooms",
            post(create_room),
        )
        .route(
            "/:route_id/segments/:segment_id/accommodations/:accommodation_id/rooms/:room_id",
            put(update_room),
        )
        .route(
            "/:route_id/segments/:segment_id/accommodations/:accommodation_id/rooms/:room_id",
            delete(delete_room),
        )
}

async fn list_accommodations(
    State(state): State<AppState>,
    Path((route_id, segment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<AccommodationResponse>>, AppError> {
    let controller = AccommodationController::new(state.pool.clone());
    let response = controller.list(route_id, segment_id).await?;
    Ok(Json(response))
}

async fn create_accommodation(
    State(state): State<AppState>,
    Path((route_id, segment_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<CreateAccommodationRequest>,
) -> Result<(StatusCode, Json<AccommodationResponse>), AppError> {
    let controller = AccommodationController::new(state.pool.clone());
    let response = controller.create(route_id, segment_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn delete_accommodation(
    State(state): State<AppState>,
    Path((route_id, segment_id, accommodation_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = AccommodationController::new(state.pool.clone());
    controller
        .delete(route_id, segment_id, accommodation_id)
        .await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Accommodation deleted successfully"
    })))
}

async fn create_room(
    State(state): State<AppState>,
    Path((route_id, segment_id, accommodation_id)): Path<(Uuid, Uuid, Uuid)>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomResponse>), AppError> {
    let controller = AccommodationController::new(state.pool.clone());
    let response = controller
        .create_room(route_id, segment_id, accommodation_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_room(
    State(state): State<AppState>,
    Path((route_id, segment_id, accommodation_id, room_id)): Path<(Uuid, Uuid, Uuid, Uuid)>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<Json<RoomResponse>, AppError> {
    let controller = AccommodationController::new(state.pool.clone());
    let response = controller
        .update_room(route_id, segment_id, accommodation_id, room_id, request)
        .await?;
    Ok(Json(response))
}

async fn delete_room(
    State(state): State<AppState>,
    Path((route_id, segment_id, accommodation_id, room_id)): Path<(Uuid, Uuid, Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = AccommodationController::new(state.pool.clone());
    controller
        .delete_room(route_id, segment_id, accommodation_id, room_id)
        .await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Room deleted successfully"
    })))
}
