use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Stop {
    pub id: Uuid,
    pub segment_id: Uuid,
    pub location_id: Uuid,
    pub stop_order: i32,
    pub notes: Option<String>,
    pub location_name: Option<String>,
}

const STOP_SELECT: &str = r#"
    SELECT st.*, l.name AS location_name
    FROM segment_stops st
    LEFT JOIN locations l ON l.id = st.location_id
"#;

pub struct StopRepository {
    pool: PgPool,
}

impl StopRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_segment(&self, segment_id: Uuid) -> Result<Vec<Stop>, AppError> {
        let query = format!("{} WHERE st.segment_id = $1 ORDER BY st.stop_order", STOP_SELECT);
        let stops = sqlx::query_as::<_, Stop>(&query)
            .bind(segment_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing stops: {}", e)))?;

        Ok(stops)
    }

    /// Paradas de varios segmentos de una vez, para el ensamblado del agregado
    pub async fn find_by_segments(&self, segment_ids: &[Uuid]) -> Result<Vec<Stop>, AppError> {
        let query = format!(
            "{} WHERE st.segment_id = ANY($1) ORDER BY st.stop_order",
            STOP_SELECT
        );
        let stops = sqlx::query_as::<_, Stop>(&query)
            .bind(segment_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing stops: {}", e)))?;

        Ok(stops)
    }

    pub async fn find_by_id(&self, id: Uuid, segment_id: Uuid) -> Result<Option<Stop>, AppError> {
        let query = format!("{} WHERE st.id = $1 AND st.segment_id = $2", STOP_SELECT);
        let stop = sqlx::query_as::<_, Stop>(&query)
            .bind(id)
            .bind(segment_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding stop: {}", e)))?;

        Ok(stop)
    }

    pub async fn create(
        &self,
        segment_id: Uuid,
        location_id: Uuid,
        stop_order: i32,
        notes: Option<String>,
    ) -> Result<Stop, AppError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO segment_stops (id, segment_id, location_id, stop_order, notes)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(segment_id)
        .bind(location_id)
        .bind(stop_order)
        .bind(notes)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating stop: {}", e)))?;

        self.find_by_id(id, segment_id)
            .await?
            .ok_or_else(|| AppError::Internal("Stop vanished after insert".to_string()))
    }

    /// Aplicar el nuevo orden en una sola transacción
    pub async fn reorder(&self, segment_id: Uuid, items: &[(Uuid, i32)]) -> Result<(), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Error starting transaction: {}", e)))?;

        for (id, stop_order) in items {
            sqlx::query(
                "UPDATE segment_stops SET stop_order = $3 WHERE id = $1 AND segment_id = $2",
            )
            .bind(id)
            .bind(segment_id)
            .bind(stop_order)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Database(format!("Error reordering stops: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Error committing reorder: {}", e)))?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid, segment_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM segment_stops WHERE id = $1 AND segment_id = $2")
            .bind(id)
            .bind(segment_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting stop: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
