use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::participant_controller::ParticipantController;
use crate::dto::participant_dto::{
    ParticipantRequest, ParticipantResponse, SetParticipantSegmentsRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_participant_router() -> Router<AppState> {
    Router::new()
        .route("/:route_id/participants", get(list_participants))
        .route("/:route_id/participants", post(create_participant))
        .route(
            "/:route_id/participants/:participant_id",
            put(update_participant),
        )
        .route(
            "/:route_id/participants/:participant_id",
            delete(delete_participant),
        )
        .route(
            "/:route_id/participants/:participant_id/segments",
            put(set_participant_segments),
        )
        .route(
            "/:route_id/segments/:segment_id/participants/:participant_id",
            post(add_participant_to_segment),
        )
        .route(
            "/:route_id/segments/:segment_id/participants/:participant_id",
            delete(remove_participant_from_segment),
        )
}

async fn list_participants(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
) -> Result<Json<Vec<ParticipantResponse>>, AppError> {
    let controller = ParticipantController::new(state.pool.clone());
    let response = controller.list(route_id).await?;
    Ok(Json(response))
}

async fn create_participant(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
    Json(request): Json<ParticipantRequest>,
) -> Result<(StatusCode, Json<ParticipantResponse>), AppError> {
    let controller = ParticipantController::new(state.pool.clone());
    let response = controller.create(route_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_participant(
    State(state): State<AppState>,
    Path((route_id, participant_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<ParticipantRequest>,
) -> Result<Json<ParticipantResponse>, AppError> {
    let controller = ParticipantController::new(state.pool.clone());
    let response = controller.update(participant_id, route_id, request).await?;
    Ok(Json(response))
}

async fn delete_participant(
    State(state): State<AppState>,
    Path((route_id, participant_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ParticipantController::new(state.pool.clone());
    controller.delete(participant_id, route_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Participant deleted successfully"
    })))
}

async fn set_participant_segments(
    State(state): State<AppState>,
    Path((route_id, participant_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<SetParticipantSegmentsRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ParticipantController::new(state.pool.clone());
    let segment_ids = controller
        .set_segments(route_id, participant_id, request.segment_ids)
        .await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "segment_ids": segment_ids
    })))
}

async fn add_participant_to_segment(
    State(state): State<AppState>,
    Path((route_id, segment_id, participant_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let controller = ParticipantController::new(state.pool.clone());
    controller
        .add_to_segment(route_id, segment_id, participant_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Participant added to segment"
        })),
    ))
}

async fn remove_participant_from_segment(
    State(state): State<AppState>,
    Path((route_id, segment_id, participant_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ParticipantController::new(state.pool.clone());
    controller
        .remove_from_segment(route_id, segment_id, participant_id)
        .await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Participant removed from segment"
    })))
}
