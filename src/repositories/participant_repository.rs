use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

/// Participante del roster con nombres de cliente/guía resueltos
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Participant {
    pub id: Uuid,
    pub route_id: Uuid,
    pub client_id: Option<Uuid>,
    pub guide_id: Option<Uuid>,
    pub role: Option<String>,
    pub is_optional: bool,
    pub notes: Option<String>,
    pub client_name: Option<String>,
    pub guide_name: Option<String>,
}

const PARTICIPANT_SELECT: &str = r#"
    SELECT p.*, c.full_name AS client_name, g.full_name AS guide_name
    FROM route_participants p
    LEFT JOIN clients c ON c.id = p.client_id
    LEFT JOIN guides g ON g.id = p.guide_id
"#;

pub struct ParticipantRepository {
    pool: PgPool,
}

impl ParticipantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_route(&self, route_id: Uuid) -> Result<Vec<Participant>, AppError> {
        let query = format!("{} WHERE p.route_id = $1 ORDER BY p.id", PARTICIPANT_SELECT);
        let participants = sqlx::query_as::<_, Participant>(&query)
            .bind(route_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing participants: {}", e)))?;

        Ok(participants)
    }

    pub async fn find_by_id(
        &self,
        id: Uuid,
        route_id: Uuid,
    ) -> Result<Option<Participant>, AppError> {
        let query = format!("{} WHERE p.id = $1 AND p.route_id = $2", PARTICIPANT_SELECT);
        let participant = sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .bind(route_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding participant: {}", e)))?;

        Ok(participant)
    }

    pub async fn belongs_to_route(
        &self,
        participant_id: Uuid,
        route_id: Uuid,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM route_participants WHERE id = $1 AND route_id = $2)",
        )
        .bind(participant_id)
        .bind(route_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error checking participant: {}", e)))?;

        Ok(result.0)
    }

    pub async fn create(
        &self,
        route_id: Uuid,
        client_id: Option<Uuid>,
        guide_id: Option<Uuid>,
        role: Option<String>,
        is_optional: bool,
        notes: Option<String>,
    ) -> Result<Participant, AppError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO route_participants (id, route_id, client_id, guide_id, role,
                                            is_optional, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id)
        .bind(route_id)
        .bind(client_id)
        .bind(guide_id)
        .bind(role)
        .bind(is_optional)
        .bind(notes)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating participant: {}", e)))?;

        self.find_by_id(id, route_id)
            .await?
            .ok_or_else(|| AppError::Internal("Participant vanished after insert".to_string()))
    }

    pub async fn update(
        &self,
        id: Uuid,
        route_id: Uuid,
        client_id: Option<Uuid>,
        guide_id: Option<Uuid>,
        role: Option<String>,
        is_optional: bool,
        notes: Option<String>,
    ) -> Result<Option<Participant>, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE route_participants
            SET client_id = $3, guide_id = $4, role = $5, is_optional = $6, notes = $7
            WHERE id = $1 AND route_id = $2
            "#,
        )
        .bind(id)
        .bind(route_id)
        .bind(client_id)
        .bind(guide_id)
        .bind(role)
        .bind(is_optional)
        .bind(notes)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating participant: {}", e)))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id, route_id).await
    }

    pub async fn delete(&self, id: Uuid, route_id: Uuid) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM route_participants WHERE id = $1 AND route_id = $2")
                .bind(id)
                .bind(route_id)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::Database(format!("Error deleting participant: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn segment_ids_for(&self, participant_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT segment_id FROM segment_participants WHERE participant_id = $1",
        )
        .bind(participant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing participant segments: {}", e)))?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Reemplazar la membresía de segmentos del participante.
    /// Borra todas las filas previas y reinserta el conjunto recibido
    /// dentro de una transacción; cada insert ignora duplicados.
    pub async fn set_segments(
        &self,
        participant_id: Uuid,
        segment_ids: &[Uuid],
    ) -> Result<(), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Error starting transaction: {}", e)))?;

        sqlx::query("DELETE FROM segment_participants WHERE participant_id = $1")
            .bind(participant_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::Database(format!("Error clearing participant segments: {}", e))
            })?;

        for segment_id in segment_ids {
            sqlx::query(
                r#"
                INSERT INTO segment_participants (segment_id, participant_id)
                VALUES ($1, $2)
                ON CONFLICT (segment_id, participant_id) DO NOTHING
                "#,
            )
            .bind(segment_id)
            .bind(participant_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::Database(format!("Error adding participant segment: {}", e))
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Error committing segment set: {}", e)))?;

        Ok(())
    }

    /// Insert idempotente; devuelve false si el par ya existía
    pub async fn add_to_segment(
        &self,
        segment_id: Uuid,
        participant_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO segment_participants (segment_id, participant_id)
            VALUES ($1, $2)
            ON CONFLICT (segment_id, participant_id) DO NOTHING
            "#,
        )
        .bind(segment_id)
        .bind(participant_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error adding participant to segment: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn remove_from_segment(
        &self,
        segment_id: Uuid,
        participant_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM segment_participants WHERE segment_id = $1 AND participant_id = $2",
        )
        .bind(segment_id)
        .bind(participant_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::Database(format!("Error removing participant from segment: {}", e))
        })?;

        Ok(result.rows_affected() > 0)
    }
}
