use crate::dto::participant_dto::{ParticipantRequest, ParticipantResponse};
use crate::repositories::participant_repository::ParticipantRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::segment_repository::SegmentRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Exactamente uno de client_id/guide_id debe venir asignado
fn validate_assignment(
    client_id: Option<Uuid>,
    guide_id: Option<Uuid>,
) -> Result<(Option<Uuid>, Option<Uuid>), AppError> {
    match (client_id, guide_id) {
        (Some(_), Some(_)) => Err(AppError::Validation(
            "Cannot assign both a client and a guide to the same participant".to_string(),
        )),
        (None, None) => Err(AppError::Validation(
            "Either a client or a guide must be assigned".to_string(),
        )),
        pair => Ok(pair),
    }
}

pub struct ParticipantController {
    repository: ParticipantRepository,
    routes: RouteRepository,
    segments: SegmentRepository,
}

impl ParticipantController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ParticipantRepository::new(pool.clone()),
            routes: RouteRepository::new(pool.clone()),
            segments: SegmentRepository::new(pool),
        }
    }

    pub async fn list(&self, route_id: Uuid) -> Result<Vec<ParticipantResponse>, AppError> {
        if !self.routes.exists(route_id).await? {
            return Err(AppError::NotFound("Route not found".to_string()));
        }

        let participants = self.repository.find_by_route(route_id).await?;
        Ok(participants.into_iter().map(ParticipantResponse::from).collect())
    }

    pub async fn create(
        &self,
        route_id: Uuid,
        request: ParticipantRequest,
    ) -> Result<ParticipantResponse, AppError> {
        request.validate()?;
        let (client_id, guide_id) = validate_assignment(request.client_id, request.guide_id)?;

        if !self.routes.exists(route_id).await? {
            return Err(AppError::NotFound("Route not found".to_string()));
        }

        let participant = self
            .repository
            .create(
                route_id,
                client_id,
                guide_id,
                request.role,
                request.is_optional.unwrap_or(false),
                request.notes,
            )
            .await?;

        Ok(participant.into())
    }

    pub async fn update(
        &self,
        id: Uuid,
        route_id: Uuid,
        request: ParticipantRequest,
    ) -> Result<ParticipantResponse, AppError> {
        request.validate()?;
        let (client_id, guide_id) = validate_assignment(request.client_id, request.guide_id)?;

        let participant = self
            .repository
            .update(
                id,
                route_id,
                client_id,
                guide_id,
                request.role,
                request.is_optional.unwrap_or(false),
                request.notes,
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Participant not found".to_string()))?;

        Ok(participant.into())
    }

    pub async fn delete(&self, id: Uuid, route_id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id, route_id).await? {
            return Err(AppError::NotFound("Participant not found".to_string()));
        }
        Ok(())
    }

    /// Reemplazo completo de la membresía de segmentos del participante
    pub async fn set_segments(
        &self,
        route_id: Uuid,
        participant_id: Uuid,
        segment_ids: Vec<Uuid>,
    ) -> Result<Vec<Uuid>, AppError> {
        if !self.repository.belongs_to_route(participant_id, route_id).await? {
            return Err(AppError::NotFound("Participant not found".to_string()));
        }

        self.repository.set_segments(participant_id, &segment_ids).await?;
        self.repository.segment_ids_for(participant_id).await
    }

    /// Alta de un par (segmento, participante); 409 si ya existía
    pub async fn add_to_segment(
        &self,
        route_id: Uuid,
        segment_id: Uuid,
        participant_id: Uuid,
    ) -> Result<(), AppError> {
        if !self.segments.exists(segment_id, route_id).await? {
            return Err(AppError::NotFound("Segment not found".to_string()));
        }
        if !self.repository.belongs_to_route(participant_id, route_id).await? {
            return Err(AppError::NotFound("Participant not found".to_string()));
        }

        if !self.repository.add_to_segment(segment_id, participant_id).await? {
            return Err(AppError::Conflict(
                "Participant is already assigned to this segment".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn remove_from_segment(
        &self,
        route_id: Uuid,
        segment_id: Uuid,
        participant_id: Uuid,
    ) -> Result<(), AppError> {
        if !self.segments.exists(segment_id, route_id).await? {
            return Err(AppError::NotFound("Segment not found".to_string()));
        }

        if !self
            .repository
            .remove_from_segment(segment_id, participant_id)
            .await?
        {
            return Err(AppError::NotFound(
                "Participant is not assigned to this segment".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_both_client_and_guide() {
        let err = validate_assignment(Some(Uuid::new_v4()), Some(Uuid::new_v4())).unwrap_err();
        assert!(err.to_string().contains("Cannot assign both"));
    }

    #[test]
    fn test_rejects_neither_client_nor_guide() {
        assert!(validate_assignment(None, None).is_err());
    }

    #[test]
    fn test_accepts_exactly_one() {
        let client = Uuid::new_v4();
        let (client_id, guide_id) = validate_assignment(Some(client), None).unwrap();
        assert_eq!(client_id, Some(client));
        assert_eq!(guide_id, None);

        let guide = Uuid::new_v4();
        let (client_id, guide_id) = validate_assignment(None, Some(guide)).unwrap();
        assert_eq!(client_id, None);
        assert_eq!(guide_id, Some(guide));
    }
}
