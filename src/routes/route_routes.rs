use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::route_controller::RouteController;
use crate::dto::route_dto::{
    CreateRouteRequest, DuplicateRouteRequest, RouteDetailResponse, RouteResponse,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes))
        .route("/", post(create_route))
        .route("/:route_id", get(get_route))
        .route("/:route_id", put(update_route))
        .route("/:route_id", delete(delete_route))
        .route("/:route_id/duplicate", post(duplicate_route))
}

async fn list_routes(
    State(state): State<AppState>,
) -> Result<Json<Vec<RouteResponse>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn create_route(
    State(state): State<AppState>,
    Json(request): Json<CreateRouteRequest>,
) -> Result<(StatusCode, Json<RouteResponse>), AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller
        .create(request, &state.config.default_currency)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_route(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
) -> Result<Json<RouteDetailResponse>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.get_detail(route_id).await?;
    Ok(Json(response))
}

async fn update_route(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
    Json(request): Json<CreateRouteRequest>,
) -> Result<Json<ApiResponse<RouteResponse>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller
        .update(route_id, request, &state.config.default_currency)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Route updated successfully".to_string(),
    )))
}

async fn delete_route(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    controller.delete(route_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Route deleted successfully"
    })))
}

async fn duplicate_route(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
    request: Option<Json<DuplicateRouteRequest>>,
) -> Result<(StatusCode, Json<RouteResponse>), AppError> {
    // El body es opcional: sin nombre se usa "<original> (Copy)"
    let request = request
        .map(|Json(r)| r)
        .unwrap_or(DuplicateRouteRequest { name: None });
    let controller = RouteController::new(state.pool.clone());
    let response = controller.duplicate(route_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
