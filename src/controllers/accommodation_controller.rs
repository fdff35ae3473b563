use crate::dto::accommodation_dto::{
    AccommodationResponse, CreateAccommodationRequest, CreateRoomRequest, RoomParticipantInput,
    RoomParticipantResponse, RoomResponse,
};
use crate::repositories::accommodation_repository::{AccommodationRepository, RoomOccupant};
use crate::repositories::segment_repository::SegmentRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::{decimal_from_f64, require_string, require_value};
use sqlx::types::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct AccommodationController {
    repository: AccommodationRepository,
    segments: SegmentRepository,
}

impl AccommodationController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AccommodationRepository::new(pool.clone()),
            segments: SegmentRepository::new(pool),
        }
    }

    async fn check_segment(&self, segment_id: Uuid, route_id: Uuid) -> Result<(), AppError> {
        if !self.segments.exists(segment_id, route_id).await? {
            return Err(AppError::NotFound("Segment not found".to_string()));
        }
        Ok(())
    }

    async fn check_accommodation(
        &self,
        accommodation_id: Uuid,
        segment_id: Uuid,
        route_id: Uuid,
    ) -> Result<(), AppError> {
        self.check_segment(segment_id, route_id).await?;
        if !self.repository.exists(accommodation_id, segment_id).await? {
            return Err(AppError::NotFound("Accommodation not found".to_string()));
        }
        Ok(())
    }

    /// Alojamientos del segmento con habitaciones y ocupantes anidados
    pub async fn list(
        &self,
        route_id: Uuid,
        segment_id: Uuid,
    ) -> Result<Vec<AccommodationResponse>, AppError> {
        self.check_segment(segment_id, route_id).await?;

        let accommodations = self.repository.find_by_segment(segment_id).await?;
        let accommodation_ids: Vec<Uuid> = accommodations.iter().map(|a| a.id).collect();
        let rooms = self
            .repository
            .rooms_for_accommodations(&accommodation_ids)
            .await?;
        let room_ids: Vec<Uuid> = rooms.iter().map(|r| r.id).collect();
        let occupants = self.repository.occupants_for_rooms(&room_ids).await?;

        let responses = accommodations
            .into_iter()
            .map(|accommodation| {
                let accommodation_rooms = rooms
                    .iter()
                    .filter(|r| r.accommodation_id == accommodation.id)
                    .cloned()
                    .map(|room| {
                        let participants = occupants_of(&occupants, room.id);
                        RoomResponse::from_room(room, participants)
                    })
                    .collect();
                AccommodationResponse::from_accommodation(accommodation, accommodation_rooms)
            })
            .collect();

        Ok(responses)
    }

    pub async fn create(
        &self,
        route_id: Uuid,
        segment_id: Uuid,
        request: CreateAccommodationRequest,
    ) -> Result<AccommodationResponse, AppError> {
        request.validate()?;

        let hotel_id = require_value(request.hotel_id, "Hotel is required")?;
        let client_type = require_string(request.client_type, "Client type is required")?;

        self.check_segment(segment_id, route_id).await?;

        let accommodation = self
            .repository
            .create(segment_id, hotel_id, client_type, request.notes)
            .await?;

        Ok(AccommodationResponse::from_accommodation(
            accommodation,
            Vec::new(),
        ))
    }

    pub async fn delete(
        &self,
        route_id: Uuid,
        segment_id: Uuid,
        accommodation_id: Uuid,
    ) -> Result<(), AppError> {
        self.check_segment(segment_id, route_id).await?;

        if !self.repository.delete(accommodation_id, segment_id).await? {
            return Err(AppError::NotFound("Accommodation not found".to_string()));
        }
        Ok(())
    }

    pub async fn create_room(
        &self,
        route_id: Uuid,
        segment_id: Uuid,
        accommodation_id: Uuid,
        request: CreateRoomRequest,
    ) -> Result<RoomResponse, AppError> {
        request.validate()?;

        let room_type = require_string(request.room_type, "Room type is required")?;
        let cost_per_night = room_cost(request.cost_per_night)?;

        self.check_accommodation(accommodation_id, segment_id, route_id)
            .await?;

        let participants = participant_pairs(request.participants.as_deref().unwrap_or(&[]));

        let room = self
            .repository
            .create_room(
                accommodation_id,
                room_type,
                request.room_number,
                request.capacity,
                cost_per_night,
                request.notes,
                &participants,
            )
            .await?;

        let occupants = self.repository.occupants_for_rooms(&[room.id]).await?;
        let responses = occupants_of(&occupants, room.id);
        Ok(RoomResponse::from_room(room, responses))
    }

    /// Reemplaza los campos de la habitación y, si viene la lista,
    /// el conjunto completo de ocupantes.
    pub async fn update_room(
        &self,
        route_id: Uuid,
        segment_id: Uuid,
        accommodation_id: Uuid,
        room_id: Uuid,
        request: CreateRoomRequest,
    ) -> Result<RoomResponse, AppError> {
        request.validate()?;

        let room_type = require_string(request.room_type, "Room type is required")?;
        let cost_per_night = room_cost(request.cost_per_night)?;

        self.check_accommodation(accommodation_id, segment_id, route_id)
            .await?;

        let participants = request.participants.as_deref().map(participant_pairs);

        let room = self
            .repository
            .update_room(
                room_id,
                accommodation_id,
                room_type,
                request.room_number,
                request.capacity,
                cost_per_night,
                request.notes,
                participants.as_deref(),
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;

        let occupants = self.repository.occupants_for_rooms(&[room.id]).await?;
        let responses = occupants_of(&occupants, room.id);
        Ok(RoomResponse::from_room(room, responses))
    }

    pub async fn delete_room(
        &self,
        route_id: Uuid,
        segment_id: Uuid,
        accommodation_id: Uuid,
        room_id: Uuid,
    ) -> Result<(), AppError> {
        self.check_accommodation(accommodation_id, segment_id, route_id)
            .await?;

        if !self.repository.delete_room(room_id, accommodation_id).await? {
            return Err(AppError::NotFound("Room not found".to_string()));
        }
        Ok(())
    }
}

fn occupants_of(occupants: &[RoomOccupant], room_id: Uuid) -> Vec<RoomParticipantResponse> {
    occupants
        .iter()
        .filter(|o| o.room_id == room_id)
        .cloned()
        .map(RoomParticipantResponse::from)
        .collect()
}

fn room_cost(cost_per_night: Option<f64>) -> Result<Decimal, AppError> {
    match cost_per_night {
        Some(cost) => decimal_from_f64(cost, "Invalid cost per night"),
        None => Ok(Decimal::ZERO),
    }
}

fn participant_pairs(participants: &[RoomParticipantInput]) -> Vec<(Uuid, bool)> {
    participants
        .iter()
        .map(|p| (p.participant_id, p.is_couple.unwrap_or(false)))
        .collect()
}
