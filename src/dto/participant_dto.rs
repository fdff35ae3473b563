use crate::repositories::participant_repository::Participant;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request para crear o reemplazar un participante del roster.
/// Exactamente uno de client_id/guide_id debe venir asignado.
#[derive(Debug, Deserialize, Validate)]
pub struct ParticipantRequest {
    pub client_id: Option<Uuid>,
    pub guide_id: Option<Uuid>,

    #[validate(length(max = 100))]
    pub role: Option<String>,

    pub is_optional: Option<bool>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Request para reemplazar la membresía de segmentos de un participante
#[derive(Debug, Deserialize)]
pub struct SetParticipantSegmentsRequest {
    pub segment_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ParticipantResponse {
    pub id: Uuid,
    pub route_id: Uuid,
    pub client_id: Option<Uuid>,
    pub client_name: Option<String>,
    pub guide_id: Option<Uuid>,
    pub guide_name: Option<String>,
    pub role: Option<String>,
    pub is_optional: bool,
    pub notes: Option<String>,
}

impl From<Participant> for ParticipantResponse {
    fn from(participant: Participant) -> Self {
        Self {
            id: participant.id,
            route_id: participant.route_id,
            client_id: participant.client_id,
            client_name: participant.client_name,
            guide_id: participant.guide_id,
            guide_name: participant.guide_name,
            role: participant.role,
            is_optional: participant.is_optional,
            notes: participant.notes,
        }
    }
}
