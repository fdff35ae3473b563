use crate::repositories::accommodation_repository::{Accommodation, Room, RoomOccupant};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request para crear un alojamiento en un segmento
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAccommodationRequest {
    pub hotel_id: Option<Uuid>,
    pub client_type: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Ocupante a asignar a una habitación
#[derive(Debug, Deserialize)]
pub struct RoomParticipantInput {
    pub participant_id: Uuid,
    pub is_couple: Option<bool>,
}

/// Request para crear una habitación con sus ocupantes
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoomRequest {
    pub room_type: Option<String>,
    pub room_number: Option<String>,
    pub capacity: Option<i32>,
    pub cost_per_night: Option<f64>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,

    pub participants: Option<Vec<RoomParticipantInput>>,
}

#[derive(Debug, Serialize)]
pub struct RoomParticipantResponse {
    pub participant_id: Uuid,
    pub participant_name: String,
    pub role: Option<String>,
    pub is_couple: bool,
}

impl From<RoomOccupant> for RoomParticipantResponse {
    fn from(occupant: RoomOccupant) -> Self {
        Self {
            participant_id: occupant.participant_id,
            participant_name: occupant.participant_name,
            role: occupant.role,
            is_couple: occupant.is_couple,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoomResponse {
    pub id: Uuid,
    pub accommodation_id: Uuid,
    pub room_type: String,
    pub room_number: Option<String>,
    pub capacity: Option<i32>,
    pub cost_per_night: f64,
    pub notes: Option<String>,
    pub participants: Vec<RoomParticipantResponse>,
}

impl RoomResponse {
    pub fn from_room(room: Room, participants: Vec<RoomParticipantResponse>) -> Self {
        Self {
            id: room.id,
            accommodation_id: room.accommodation_id,
            room_type: room.room_type,
            room_number: room.room_number,
            capacity: room.capacity,
            cost_per_night: room.cost_per_night.to_string().parse().unwrap_or(0.0),
            notes: room.notes,
            participants,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AccommodationResponse {
    pub id: Uuid,
    pub segment_id: Uuid,
    pub hotel_id: Uuid,
    pub hotel_name: Option<String>,
    pub client_type: String,
    pub notes: Option<String>,
    pub rooms: Vec<RoomResponse>,
}

impl AccommodationResponse {
    pub fn from_accommodation(accommodation: Accommodation, rooms: Vec<RoomResponse>) -> Self {
        Self {
            id: accommodation.id,
            segment_id: accommodation.segment_id,
            hotel_id: accommodation.hotel_id,
            hotel_name: accommodation.hotel_name,
            client_type: accommodation.client_type,
            notes: accommodation.notes,
            rooms,
        }
    }
}
