use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::transaction_controller::TransactionController;
use crate::dto::transaction_dto::{CreateTransactionRequest, TransactionResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_transaction_router() -> Router<AppState> {
    Router::new()
        .route("/:route_id/transactions", get(list_transactions))
        .route("/:route_id/transactions", post(create_transaction))
}

async fn list_transactions(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
) -> Result<Json<Vec<TransactionResponse>>, AppError> {
    let controller = TransactionController::new(state.pool.clone());
    let response = controller.list(route_id).await?;
    Ok(Json(response))
}

async fn create_transaction(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<TransactionResponse>), AppError> {
    let controller = TransactionController::new(state.pool.clone());
    let response = controller
        .create(route_id, request, &state.config.default_currency)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}
