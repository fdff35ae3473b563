use crate::dto::segment_dto::{CreateStopRequest, StopOrderItem, StopResponse};
use crate::repositories::segment_repository::SegmentRepository;
use crate::repositories::stop_repository::StopRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::require_value;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct StopController {
    repository: StopRepository,
    segments: SegmentRepository,
}

impl StopController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: StopRepository::new(pool.clone()),
            segments: SegmentRepository::new(pool),
        }
    }

    /// 404 si el segmento no existe bajo esa ruta
    async fn check_segment(&self, segment_id: Uuid, route_id: Uuid) -> Result<(), AppError> {
        if !self.segments.exists(segment_id, route_id).await? {
            return Err(AppError::NotFound("Segment not found".to_string()));
        }
        Ok(())
    }

    pub async fn list(
        &self,
        route_id: Uuid,
        segment_id: Uuid,
    ) -> Result<Vec<StopResponse>, AppError> {
        self.check_segment(segment_id, route_id).await?;

        let stops = self.repository.find_by_segment(segment_id).await?;
        Ok(stops.into_iter().map(StopResponse::from).collect())
    }

    pub async fn create(
        &self,
        route_id: Uuid,
        segment_id: Uuid,
        request: CreateStopRequest,
    ) -> Result<StopResponse, AppError> {
        request.validate()?;

        let location_id = require_value(request.location_id, "Location is required")?;

        self.check_segment(segment_id, route_id).await?;

        let stop = self
            .repository
            .create(
                segment_id,
                location_id,
                request.stop_order.unwrap_or(1),
                request.notes,
            )
            .await?;

        Ok(stop.into())
    }

    pub async fn reorder(
        &self,
        route_id: Uuid,
        segment_id: Uuid,
        items: Vec<StopOrderItem>,
    ) -> Result<(), AppError> {
        self.check_segment(segment_id, route_id).await?;

        let pairs: Vec<(Uuid, i32)> = items.iter().map(|i| (i.id, i.stop_order)).collect();
        self.repository.reorder(segment_id, &pairs).await
    }

    pub async fn delete(
        &self,
        route_id: Uuid,
        segment_id: Uuid,
        stop_id: Uuid,
    ) -> Result<(), AppError> {
        self.check_segment(segment_id, route_id).await?;

        if !self.repository.delete(stop_id, segment_id).await? {
            return Err(AppError::NotFound("Stop not found".to_string()));
        }
        Ok(())
    }
}
