use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::transfer_controller::TransferController;
use crate::dto::transfer_dto::{
    AddTransferParticipantRequest, TransferRequest, TransferResponse, TransferVehicleInput,
    TransferVehicleResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_transfer_router() -> Router<AppState> {
    Router::new()
        .route("/:route_id/transfers", get(list_transfers))
        .route("/:route_id/transfers", post(create_transfer))
        .route("/:route_id/transfers/:transfer_id", put(update_transfer))
        .route("/:route_id/transfers/:transfer_id", delete(delete_transfer))
        .route(
            "/:route_id/transfers/:transfer_id/vehicles",
            post(add_transfer_vehicle),
        )
        .route(
            "/:route_id/transfers/:transfer_id/vehicles/:vehicle_id",
            delete(remove_transfer_vehicle),
        )
        .route(
            "/:route_id/transfers/:transfer_id/participants",
            post(add_transfer_participant),
        )
        .route(
            "/:route_id/transfers/:transfer_id/participants/:participant_id",
            delete(remove_transfer_participant),
        )
}

async fn list_transfers(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
) -> Result<Json<Vec<TransferResponse>>, AppError> {
    let controller = TransferController::new(state.pool.clone());
    let response = controller.list(route_id).await?;
    Ok(Json(response))
}

async fn create_transfer(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
    Json(request): Json<TransferRequest>,
) -> Result<(StatusCode, Json<TransferResponse>), AppError> {
    let controller = TransferController::new(state.pool.clone());
    let response = controller.create(route_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_transfer(
    State(state): State<AppState>,
    Path((route_id, transfer_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TransferResponse>, AppError> {
    let controller = TransferController::new(state.pool.clone());
    let response = controller.update(transfer_id, route_id, request).await?;
    Ok(Json(response))
}

async fn delete_transfer(
    State(state): State<AppState>,
    Path((route_id, transfer_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = TransferController::new(state.pool.clone());
    controller.delete(transfer_id, route_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Transfer deleted successfully"
    })))
}

async fn add_transfer_vehicle(
    State(state): State<AppState>,
    Path((route_id, transfer_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<TransferVehicleInput>,
) -> Result<(StatusCode, Json<TransferVehicleResponse>), AppError> {
    let controller = TransferController::new(state.pool.clone());
    let response = controller
        .add_vehicle(route_id, transfer_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn remove_transfer_vehicle(
    State(state): State<AppState>,
    Path((route_id, transfer_id, vehicle_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = TransferController::new(state.pool.clone());
    controller
        .remove_vehicle(route_id, transfer_id, vehicle_id)
        .await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Transfer vehicle removed"
    })))
}

async fn add_transfer_participant(
    State(state): State<AppState>,
    Path((route_id, transfer_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<AddTransferParticipantRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let controller = TransferController::new(state.pool.clone());
    controller
        .add_participant(route_id, transfer_id, request.participant_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Participant added to transfer"
        })),
    ))
}

async fn remove_transfer_participant(
    State(state): State<AppState>,
    Path((route_id, transfer_id, participant_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = TransferController::new(state.pool.clone());
    controller
        .remove_participant(route_id, transfer_id, participant_id)
        .await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Participant removed from transfer"
    })))
}
