use crate::utils::errors::AppError;
use sqlx::types::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Accommodation {
    pub id: Uuid,
    pub segment_id: Uuid,
    pub hotel_id: Uuid,
    pub client_type: String,
    pub notes: Option<String>,
    pub hotel_name: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Room {
    pub id: Uuid,
    pub accommodation_id: Uuid,
    pub room_type: String,
    pub room_number: Option<String>,
    pub capacity: Option<i32>,
    pub cost_per_night: Decimal,
    pub notes: Option<String>,
}

/// Ocupante de habitación con nombre y rol resueltos.
/// El nombre cae a "Staff" cuando el participante es un guía sin registro.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoomOccupant {
    pub room_id: Uuid,
    pub participant_id: Uuid,
    pub is_couple: bool,
    pub role: Option<String>,
    pub participant_name: String,
}

const OCCUPANT_SELECT: &str = r#"
    SELECT rp.room_id, rp.participant_id, rp.is_couple, p.role,
           COALESCE(c.full_name, g.full_name, 'Staff') AS participant_name
    FROM room_participants rp
    JOIN route_participants p ON p.id = rp.participant_id
    LEFT JOIN clients c ON c.id = p.client_id
    LEFT JOIN guides g ON g.id = p.guide_id
"#;

pub struct AccommodationRepository {
    pool: PgPool,
}

impl AccommodationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_segment(&self, segment_id: Uuid) -> Result<Vec<Accommodation>, AppError> {
        let accommodations = sqlx::query_as::<_, Accommodation>(
            r#"
            SELECT a.*, h.name AS hotel_name
            FROM segment_accommodations a
            LEFT JOIN hotels h ON h.id = a.hotel_id
            WHERE a.segment_id = $1
            "#,
        )
        .bind(segment_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing accommodations: {}", e)))?;

        Ok(accommodations)
    }

    pub async fn find_by_id(
        &self,
        id: Uuid,
        segment_id: Uuid,
    ) -> Result<Option<Accommodation>, AppError> {
        let accommodation = sqlx::query_as::<_, Accommodation>(
            r#"
            SELECT a.*, h.name AS hotel_name
            FROM segment_accommodations a
            LEFT JOIN hotels h ON h.id = a.hotel_id
            WHERE a.id = $1 AND a.segment_id = $2
            "#,
        )
        .bind(id)
        .bind(segment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error finding accommodation: {}", e)))?;

        Ok(accommodation)
    }

    pub async fn exists(&self, id: Uuid, segment_id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM segment_accommodations WHERE id = $1 AND segment_id = $2)",
        )
        .bind(id)
        .bind(segment_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error checking accommodation: {}", e)))?;

        Ok(result.0)
    }

    pub async fn create(
        &self,
        segment_id: Uuid,
        hotel_id: Uuid,
        client_type: String,
        notes: Option<String>,
    ) -> Result<Accommodation, AppError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO segment_accommodations (id, segment_id, hotel_id, client_type, notes)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(segment_id)
        .bind(hotel_id)
        .bind(client_type)
        .bind(notes)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating accommodation: {}", e)))?;

        self.find_by_id(id, segment_id)
            .await?
            .ok_or_else(|| AppError::Internal("Accommodation vanished after insert".to_string()))
    }

    pub async fn delete(&self, id: Uuid, segment_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM segment_accommodations WHERE id = $1 AND segment_id = $2",
        )
        .bind(id)
        .bind(segment_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error deleting accommodation: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn rooms_for_accommodations(
        &self,
        accommodation_ids: &[Uuid],
    ) -> Result<Vec<Room>, AppError> {
        let rooms = sqlx::query_as::<_, Room>(
            "SELECT * FROM accommodation_rooms WHERE accommodation_id = ANY($1)",
        )
        .bind(accommodation_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing rooms: {}", e)))?;

        Ok(rooms)
    }

    pub async fn find_room(
        &self,
        room_id: Uuid,
        accommodation_id: Uuid,
    ) -> Result<Option<Room>, AppError> {
        let room = sqlx::query_as::<_, Room>(
            "SELECT * FROM accommodation_rooms WHERE id = $1 AND accommodation_id = $2",
        )
        .bind(room_id)
        .bind(accommodation_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error finding room: {}", e)))?;

        Ok(room)
    }

    pub async fn occupants_for_rooms(
        &self,
        room_ids: &[Uuid],
    ) -> Result<Vec<RoomOccupant>, AppError> {
        let query = format!("{} WHERE rp.room_id = ANY($1)", OCCUPANT_SELECT);
        let occupants = sqlx::query_as::<_, RoomOccupant>(&query)
            .bind(room_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing room participants: {}", e)))?;

        Ok(occupants)
    }

    /// Insertar la habitación y sus ocupantes en una sola transacción
    pub async fn create_room(
        &self,
        accommodation_id: Uuid,
        room_type: String,
        room_number: Option<String>,
        capacity: Option<i32>,
        cost_per_night: Decimal,
        notes: Option<String>,
        participants: &[(Uuid, bool)],
    ) -> Result<Room, AppError> {
        let id = Uuid::new_v4();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Error starting transaction: {}", e)))?;

        let room = sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO accommodation_rooms (id, accommodation_id, room_type, room_number,
                                             capacity, cost_per_night, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(accommodation_id)
        .bind(room_type)
        .bind(room_number)
        .bind(capacity)
        .bind(cost_per_night)
        .bind(notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::Database(format!("Error creating room: {}", e)))?;

        for (participant_id, is_couple) in participants {
            sqlx::query(
                r#"
                INSERT INTO room_participants (room_id, participant_id, is_couple)
                VALUES ($1, $2, $3)
                ON CONFLICT (room_id, participant_id) DO NOTHING
                "#,
            )
            .bind(id)
            .bind(participant_id)
            .bind(is_couple)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Database(format!("Error adding room participant: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Error committing room: {}", e)))?;

        Ok(room)
    }

    /// Actualizar la habitación y reemplazar su conjunto de ocupantes.
    /// El reemplazo borra todas las filas previas y reinserta el conjunto
    /// recibido, todo dentro de una transacción.
    pub async fn update_room(
        &self,
        room_id: Uuid,
        accommodation_id: Uuid,
        room_type: String,
        room_number: Option<String>,
        capacity: Option<i32>,
        cost_per_night: Decimal,
        notes: Option<String>,
        participants: Option<&[(Uuid, bool)]>,
    ) -> Result<Option<Room>, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Error starting transaction: {}", e)))?;

        let room = sqlx::query_as::<_, Room>(
            r#"
            UPDATE accommodation_rooms
            SET room_type = $3, room_number = $4, capacity = $5, cost_per_night = $6, notes = $7
            WHERE id = $1 AND accommodation_id = $2
            RETURNING *
            "#,
        )
        .bind(room_id)
        .bind(accommodation_id)
        .bind(room_type)
        .bind(room_number)
        .bind(capacity)
        .bind(cost_per_night)
        .bind(notes)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::Database(format!("Error updating room: {}", e)))?;

        let Some(room) = room else {
            return Ok(None);
        };

        if let Some(participants) = participants {
            sqlx::query("DELETE FROM room_participants WHERE room_id = $1")
                .bind(room_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::Database(format!("Error clearing room participants: {}", e))
                })?;

            for (participant_id, is_couple) in participants {
                sqlx::query(
                    r#"
                    INSERT INTO room_participants (room_id, participant_id, is_couple)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (room_id, participant_id) DO NOTHING
                    "#,
                )
                .bind(room_id)
                .bind(participant_id)
                .bind(is_couple)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::Database(format!("Error adding room participant: {}", e))
                })?;
            }
        }

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Error committing room update: {}", e)))?;

        Ok(Some(room))
    }

    pub async fn delete_room(&self, room_id: Uuid, accommodation_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM accommodation_rooms WHERE id = $1 AND accommodation_id = $2",
        )
        .bind(room_id)
        .bind(accommodation_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error deleting room: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
