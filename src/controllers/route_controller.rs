use crate::controllers::logistics_controller::resolve_entity_names;
use crate::controllers::segment_controller::build_segment_responses;
use crate::dto::participant_dto::ParticipantResponse;
use crate::dto::route_dto::{
    CreateRouteRequest, DuplicateRouteRequest, RouteDetailResponse, RouteResponse,
};
use crate::dto::transaction_dto::TransactionResponse;
use crate::repositories::logistics_repository::LogisticsRepository;
use crate::repositories::participant_repository::ParticipantRepository;
use crate::repositories::route_repository::{
    RouteFields, RouteRepository, ROUTE_STATUSES,
};
use crate::repositories::segment_repository::SegmentRepository;
use crate::repositories::stop_repository::StopRepository;
use crate::repositories::transaction_repository::TransactionRepository;
use crate::services::EntityResolver;
use crate::utils::errors::AppError;
use crate::utils::validation::{optional_decimal, require_string, validate_enum};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct RouteController {
    repository: RouteRepository,
    segments: SegmentRepository,
    stops: StopRepository,
    logistics: LogisticsRepository,
    participants: ParticipantRepository,
    transactions: TransactionRepository,
    resolver: EntityResolver,
}

impl RouteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RouteRepository::new(pool.clone()),
            segments: SegmentRepository::new(pool.clone()),
            stops: StopRepository::new(pool.clone()),
            logistics: LogisticsRepository::new(pool.clone()),
            participants: ParticipantRepository::new(pool.clone()),
            transactions: TransactionRepository::new(pool.clone()),
            resolver: EntityResolver::new(pool),
        }
    }

    fn validate_fields(
        request: CreateRouteRequest,
        default_currency: &str,
    ) -> Result<RouteFields, AppError> {
        let name = require_string(request.name, "Route name is required")?;

        let status = request.status.unwrap_or_else(|| "draft".to_string());
        if validate_enum(status.as_str(), &ROUTE_STATUSES).is_err() {
            return Err(AppError::Validation(format!(
                "Invalid route status '{}'",
                status
            )));
        }

        let currency = request
            .currency
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| default_currency.to_string());

        Ok(RouteFields {
            name,
            description: request.description,
            start_date: request.start_date,
            end_date: request.end_date,
            duration_days: request.duration_days,
            status,
            total_distance: optional_decimal(request.total_distance, "Invalid distance value")?,
            estimated_cost: optional_decimal(request.estimated_cost, "Invalid cost value")?,
            actual_cost: optional_decimal(request.actual_cost, "Invalid cost value")?,
            currency,
            notes: request.notes,
        })
    }

    pub async fn list(&self) -> Result<Vec<RouteResponse>, AppError> {
        let routes = self.repository.find_all().await?;
        Ok(routes.into_iter().map(RouteResponse::from).collect())
    }

    pub async fn create(
        &self,
        request: CreateRouteRequest,
        default_currency: &str,
    ) -> Result<RouteResponse, AppError> {
        request.validate()?;
        let fields = Self::validate_fields(request, default_currency)?;

        let route = self.repository.create(fields).await?;
        Ok(route.into())
    }

    /// Agregado completo: ruta + segmentos con paradas + logística +
    /// participantes + transacciones, en un solo grafo anidado.
    pub async fn get_detail(&self, id: Uuid) -> Result<RouteDetailResponse, AppError> {
        let route = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

        let segments = self.segments.find_by_route(id).await?;
        let segment_ids: Vec<Uuid> = segments.iter().map(|s| s.id).collect();
        let stops = self.stops.find_by_segments(&segment_ids).await?;

        let logistics = self.logistics.find_by_route(id).await?;
        let logistics = resolve_entity_names(&self.resolver, logistics).await?;

        let participants = self.participants.find_by_route(id).await?;
        let transactions = self.transactions.find_by_route(id).await?;

        Ok(RouteDetailResponse {
            route: route.into(),
            segments: build_segment_responses(segments, stops),
            logistics,
            participants: participants
                .into_iter()
                .map(ParticipantResponse::from)
                .collect(),
            transactions: transactions
                .into_iter()
                .map(TransactionResponse::from)
                .collect(),
        })
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: CreateRouteRequest,
        default_currency: &str,
    ) -> Result<RouteResponse, AppError> {
        request.validate()?;
        let fields = Self::validate_fields(request, default_currency)?;

        let route = self
            .repository
            .update(id, fields)
            .await?
            .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

        Ok(route.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound("Route not found".to_string()));
        }
        Ok(())
    }

    /// Copia superficial de la ruta (solo campos escalares)
    pub async fn duplicate(
        &self,
        id: Uuid,
        request: DuplicateRouteRequest,
    ) -> Result<RouteResponse, AppError> {
        request.validate()?;

        let name = request.name.filter(|n| !n.trim().is_empty());

        let route = self
            .repository
            .duplicate(id, name)
            .await?
            .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

        Ok(route.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateRouteRequest {
        CreateRouteRequest {
            name: Some("Amazon Trip".to_string()),
            description: None,
            start_date: None,
            end_date: None,
            duration_days: None,
            status: None,
            total_distance: None,
            estimated_cost: None,
            actual_cost: None,
            currency: None,
            notes: None,
        }
    }

    #[test]
    fn test_status_defaults_to_draft() {
        let fields = RouteController::validate_fields(base_request(), "USD").unwrap();
        assert_eq!(fields.status, "draft");
        assert_eq!(fields.currency, "USD");
    }

    #[test]
    fn test_name_is_required() {
        let mut request = base_request();
        request.name = None;
        let err = RouteController::validate_fields(request, "USD").unwrap_err();
        assert!(err.to_string().contains("Route name is required"));
    }

    #[test]
    fn test_invalid_status_rejected() {
        let mut request = base_request();
        request.status = Some("archived".to_string());
        let err = RouteController::validate_fields(request, "USD").unwrap_err();
        assert!(err.to_string().contains("Invalid route status"));
    }

    #[test]
    fn test_explicit_currency_wins_over_default() {
        let mut request = base_request();
        request.currency = Some("PEN".to_string());
        let fields = RouteController::validate_fields(request, "USD").unwrap();
        assert_eq!(fields.currency, "PEN");
    }
}
