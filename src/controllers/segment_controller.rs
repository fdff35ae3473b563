use crate::dto::segment_dto::{
    CreateSegmentRequest, SegmentOrderItem, SegmentResponse, StopResponse, UpdateSegmentRequest,
};
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::segment_repository::{Segment, SegmentRepository};
use crate::repositories::stop_repository::{Stop, StopRepository};
use crate::utils::errors::AppError;
use crate::utils::validation::{optional_decimal, require_value};
use chrono::{Duration, NaiveDate};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Valores por defecto de day_number y segment_order a partir del máximo
/// day_number existente en la ruta.
///
/// El orden por defecto reutiliza el máximo día tal cual (no maxOrder):
/// comportamiento heredado que los clientes ya esperan.
pub fn segment_defaults(
    max_day: i32,
    day_number: Option<i32>,
    segment_order: Option<i32>,
) -> (i32, i32) {
    (
        day_number.unwrap_or(max_day + 1),
        segment_order.unwrap_or(max_day),
    )
}

/// Fecha del segmento: start_date + (day_number - 1) días
pub fn segment_date_for(start_date: Option<NaiveDate>, day_number: i32) -> Option<NaiveDate> {
    start_date.map(|d| d + Duration::days(i64::from(day_number) - 1))
}

/// Agrupar las paradas por segmento y armar las responses anidadas
pub fn build_segment_responses(segments: Vec<Segment>, stops: Vec<Stop>) -> Vec<SegmentResponse> {
    segments
        .into_iter()
        .map(|segment| {
            let segment_stops = stops
                .iter()
                .filter(|s| s.segment_id == segment.id)
                .cloned()
                .map(StopResponse::from)
                .collect();
            SegmentResponse::from_segment(segment, segment_stops)
        })
        .collect()
}

pub struct SegmentController {
    repository: SegmentRepository,
    stops: StopRepository,
    routes: RouteRepository,
}

impl SegmentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: SegmentRepository::new(pool.clone()),
            stops: StopRepository::new(pool.clone()),
            routes: RouteRepository::new(pool),
        }
    }

    pub async fn list(&self, route_id: Uuid) -> Result<Vec<SegmentResponse>, AppError> {
        if !self.routes.exists(route_id).await? {
            return Err(AppError::NotFound("Route not found".to_string()));
        }

        let segments = self.repository.find_by_route(route_id).await?;
        let segment_ids: Vec<Uuid> = segments.iter().map(|s| s.id).collect();
        let stops = self.stops.find_by_segments(&segment_ids).await?;

        Ok(build_segment_responses(segments, stops))
    }

    pub async fn create(
        &self,
        route_id: Uuid,
        request: CreateSegmentRequest,
    ) -> Result<SegmentResponse, AppError> {
        request.validate()?;

        let route = self
            .routes
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

        let max_day = self.repository.max_day_number(route_id).await?;
        let (day_number, segment_order) =
            segment_defaults(max_day, request.day_number, request.segment_order);
        let segment_date = segment_date_for(route.start_date, day_number);
        let distance = optional_decimal(request.distance, "Invalid distance value")?;

        let segment = self
            .repository
            .create(
                route_id,
                day_number,
                segment_date,
                request.from_location_id,
                request.to_location_id,
                distance,
                segment_order,
                request.notes,
            )
            .await?;

        // Un segmento recién creado todavía no tiene paradas
        Ok(SegmentResponse::from_segment(segment, Vec::new()))
    }

    pub async fn update(
        &self,
        id: Uuid,
        route_id: Uuid,
        request: UpdateSegmentRequest,
    ) -> Result<SegmentResponse, AppError> {
        request.validate()?;

        let route = self
            .routes
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

        let day_number = require_value(request.day_number, "Day number is required")?;
        let segment_order = require_value(request.segment_order, "Segment order is required")?;
        let segment_date = segment_date_for(route.start_date, day_number);
        let distance = optional_decimal(request.distance, "Invalid distance value")?;

        let segment = self
            .repository
            .update(
                id,
                route_id,
                day_number,
                segment_date,
                request.from_location_id,
                request.to_location_id,
                distance,
                segment_order,
                request.notes,
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Segment not found".to_string()))?;

        let stops = self.stops.find_by_segment(id).await?;
        Ok(SegmentResponse::from_segment(
            segment,
            stops.into_iter().map(StopResponse::from).collect(),
        ))
    }

    pub async fn reorder(
        &self,
        route_id: Uuid,
        items: Vec<SegmentOrderItem>,
    ) -> Result<(), AppError> {
        if !self.routes.exists(route_id).await? {
            return Err(AppError::NotFound("Route not found".to_string()));
        }

        let pairs: Vec<(Uuid, i32)> = items.iter().map(|i| (i.id, i.segment_order)).collect();
        self.repository.reorder(route_id, &pairs).await
    }

    pub async fn delete(&self, id: Uuid, route_id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id, route_id).await? {
            return Err(AppError::NotFound("Segment not found".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_defaults_on_empty_route() {
        // Primera creación en una ruta vacía: día 1, orden 0
        assert_eq!(segment_defaults(0, None, None), (1, 0));
    }

    #[test]
    fn test_segment_defaults_on_second_segment() {
        assert_eq!(segment_defaults(1, None, None), (2, 1));
    }

    #[test]
    fn test_segment_defaults_explicit_values_win() {
        assert_eq!(segment_defaults(4, Some(2), Some(7)), (2, 7));
    }

    #[test]
    fn test_segment_order_default_reuses_max_day() {
        // El orden por defecto es el máximo día, no el máximo orden
        let (_, order) = segment_defaults(3, Some(9), None);
        assert_eq!(order, 3);
    }

    #[test]
    fn test_segment_date_from_start_date() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        assert_eq!(segment_date_for(Some(start), 1), Some(start));
        assert_eq!(
            segment_date_for(Some(start), 3),
            NaiveDate::from_ymd_opt(2025, 6, 12)
        );
    }

    #[test]
    fn test_segment_date_without_start_date() {
        assert_eq!(segment_date_for(None, 5), None);
    }
}
