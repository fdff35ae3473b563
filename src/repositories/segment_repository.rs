use crate::utils::errors::AppError;
use chrono::{NaiveDate, Utc};
use sqlx::types::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Segmento de día con los nombres de ubicación ya resueltos
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Segment {
    pub id: Uuid,
    pub route_id: Uuid,
    pub day_number: i32,
    pub segment_date: Option<NaiveDate>,
    pub from_location_id: Option<Uuid>,
    pub to_location_id: Option<Uuid>,
    pub distance: Option<Decimal>,
    pub segment_order: i32,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<Utc>,
    pub from_location_name: Option<String>,
    pub to_location_name: Option<String>,
}

const SEGMENT_SELECT: &str = r#"
    SELECT s.*, fl.name AS from_location_name, tl.name AS to_location_name
    FROM route_segments s
    LEFT JOIN locations fl ON fl.id = s.from_location_id
    LEFT JOIN locations tl ON tl.id = s.to_location_id
"#;

pub struct SegmentRepository {
    pool: PgPool,
}

impl SegmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_route(&self, route_id: Uuid) -> Result<Vec<Segment>, AppError> {
        let query = format!(
            "{} WHERE s.route_id = $1 ORDER BY s.segment_order, s.day_number",
            SEGMENT_SELECT
        );
        let segments = sqlx::query_as::<_, Segment>(&query)
            .bind(route_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing segments: {}", e)))?;

        Ok(segments)
    }

    pub async fn find_by_id(
        &self,
        id: Uuid,
        route_id: Uuid,
    ) -> Result<Option<Segment>, AppError> {
        let query = format!("{} WHERE s.id = $1 AND s.route_id = $2", SEGMENT_SELECT);
        let segment = sqlx::query_as::<_, Segment>(&query)
            .bind(id)
            .bind(route_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding segment: {}", e)))?;

        Ok(segment)
    }

    pub async fn exists(&self, id: Uuid, route_id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM route_segments WHERE id = $1 AND route_id = $2)",
        )
        .bind(id)
        .bind(route_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error checking segment: {}", e)))?;

        Ok(result.0)
    }

    /// Máximo day_number existente en la ruta (0 si no hay segmentos)
    pub async fn max_day_number(&self, route_id: Uuid) -> Result<i32, AppError> {
        let result: (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(day_number), 0) FROM route_segments WHERE route_id = $1",
        )
        .bind(route_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error computing max day number: {}", e)))?;

        Ok(result.0)
    }

    pub async fn create(
        &self,
        route_id: Uuid,
        day_number: i32,
        segment_date: Option<NaiveDate>,
        from_location_id: Option<Uuid>,
        to_location_id: Option<Uuid>,
        distance: Option<Decimal>,
        segment_order: i32,
        notes: Option<String>,
    ) -> Result<Segment, AppError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO route_segments (id, route_id, day_number, segment_date,
                                        from_location_id, to_location_id, distance,
                                        segment_order, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(id)
        .bind(route_id)
        .bind(day_number)
        .bind(segment_date)
        .bind(from_location_id)
        .bind(to_location_id)
        .bind(distance)
        .bind(segment_order)
        .bind(notes)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating segment: {}", e)))?;

        // Releer con los nombres de ubicación resueltos
        self.find_by_id(id, route_id)
            .await?
            .ok_or_else(|| AppError::Internal("Segment vanished after insert".to_string()))
    }

    pub async fn update(
        &self,
        id: Uuid,
        route_id: Uuid,
        day_number: i32,
        segment_date: Option<NaiveDate>,
        from_location_id: Option<Uuid>,
        to_location_id: Option<Uuid>,
        distance: Option<Decimal>,
        segment_order: i32,
        notes: Option<String>,
    ) -> Result<Option<Segment>, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE route_segments
            SET day_number = $3, segment_date = $4, from_location_id = $5,
                to_location_id = $6, distance = $7, segment_order = $8, notes = $9
            WHERE id = $1 AND route_id = $2
            "#,
        )
        .bind(id)
        .bind(route_id)
        .bind(day_number)
        .bind(segment_date)
        .bind(from_location_id)
        .bind(to_location_id)
        .bind(distance)
        .bind(segment_order)
        .bind(notes)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating segment: {}", e)))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id, route_id).await
    }

    /// Aplicar el nuevo orden en una sola transacción
    pub async fn reorder(
        &self,
        route_id: Uuid,
        items: &[(Uuid, i32)],
    ) -> Result<(), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Error starting transaction: {}", e)))?;

        for (id, segment_order) in items {
            sqlx::query(
                "UPDATE route_segments SET segment_order = $3 WHERE id = $1 AND route_id = $2",
            )
            .bind(id)
            .bind(route_id)
            .bind(segment_order)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Database(format!("Error reordering segments: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Error committing reorder: {}", e)))?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid, route_id: Uuid) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM route_segments WHERE id = $1 AND route_id = $2")
                .bind(id)
                .bind(route_id)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::Database(format!("Error deleting segment: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
