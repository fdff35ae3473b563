use crate::dto::logistics_dto::LogisticsResponse;
use crate::dto::participant_dto::ParticipantResponse;
use crate::dto::segment_dto::SegmentResponse;
use crate::dto::transaction_dto::TransactionResponse;
use crate::repositories::route_repository::Route;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request para crear o reemplazar una ruta
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRouteRequest {
    #[validate(length(max = 200))]
    pub name: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_days: Option<i32>,
    pub status: Option<String>,
    pub total_distance: Option<f64>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub currency: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Request para duplicar una ruta
#[derive(Debug, Deserialize, Validate)]
pub struct DuplicateRouteRequest {
    #[validate(length(max = 200))]
    pub name: Option<String>,
}

/// Response de ruta para la API
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_days: Option<i32>,
    pub status: String,
    pub total_distance: Option<f64>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub currency: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Route> for RouteResponse {
    fn from(route: Route) -> Self {
        Self {
            id: route.id,
            name: route.name,
            description: route.description,
            start_date: route.start_date,
            end_date: route.end_date,
            duration_days: route.duration_days,
            status: route.status,
            total_distance: route
                .total_distance
                .map(|d| d.to_string().parse().unwrap_or(0.0)),
            estimated_cost: route
                .estimated_cost
                .map(|d| d.to_string().parse().unwrap_or(0.0)),
            actual_cost: route
                .actual_cost
                .map(|d| d.to_string().parse().unwrap_or(0.0)),
            currency: route.currency,
            notes: route.notes,
            created_at: route.created_at,
            updated_at: route.updated_at,
        }
    }
}

/// Agregado completo de una ruta: segmentos con paradas, logística,
/// participantes y transacciones en un solo grafo anidado.
#[derive(Debug, Serialize)]
pub struct RouteDetailResponse {
    #[serde(flatten)]
    pub route: RouteResponse,
    pub segments: Vec<SegmentResponse>,
    pub logistics: Vec<LogisticsResponse>,
    pub participants: Vec<ParticipantResponse>,
    pub transactions: Vec<TransactionResponse>,
}
