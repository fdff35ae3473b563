use crate::utils::errors::AppError;
use chrono::{NaiveDate, Utc};
use sqlx::types::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Estados válidos de una ruta
pub const ROUTE_STATUSES: [&str; 5] =
    ["draft", "confirmed", "in-progress", "completed", "cancelled"];

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Route {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_days: Option<i32>,
    pub status: String,
    pub total_distance: Option<Decimal>,
    pub estimated_cost: Option<Decimal>,
    pub actual_cost: Option<Decimal>,
    pub currency: String,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

/// Campos escalares de una ruta para create/update
#[derive(Debug)]
pub struct RouteFields {
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_days: Option<i32>,
    pub status: String,
    pub total_distance: Option<Decimal>,
    pub estimated_cost: Option<Decimal>,
    pub actual_cost: Option<Decimal>,
    pub currency: String,
    pub notes: Option<String>,
}

pub struct RouteRepository {
    pool: PgPool,
}

impl RouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Route>, AppError> {
        let routes =
            sqlx::query_as::<_, Route>("SELECT * FROM routes ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| AppError::Database(format!("Error listing routes: {}", e)))?;

        Ok(routes)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Route>, AppError> {
        let route = sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding route: {}", e)))?;

        Ok(route)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM routes WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::Database(format!("Error checking route: {}", e)))?;

        Ok(result.0)
    }

    pub async fn create(&self, fields: RouteFields) -> Result<Route, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let route = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (id, name, description, start_date, end_date, duration_days,
                                status, total_distance, estimated_cost, actual_cost, currency,
                                notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fields.name)
        .bind(fields.description)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .bind(fields.duration_days)
        .bind(fields.status)
        .bind(fields.total_distance)
        .bind(fields.estimated_cost)
        .bind(fields.actual_cost)
        .bind(fields.currency)
        .bind(fields.notes)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating route: {}", e)))?;

        Ok(route)
    }

    pub async fn update(&self, id: Uuid, fields: RouteFields) -> Result<Option<Route>, AppError> {
        let route = sqlx::query_as::<_, Route>(
            r#"
            UPDATE routes
            SET name = $2, description = $3, start_date = $4, end_date = $5,
                duration_days = $6, status = $7, total_distance = $8, estimated_cost = $9,
                actual_cost = $10, currency = $11, notes = $12, updated_at = $13
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fields.name)
        .bind(fields.description)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .bind(fields.duration_days)
        .bind(fields.status)
        .bind(fields.total_distance)
        .bind(fields.estimated_cost)
        .bind(fields.actual_cost)
        .bind(fields.currency)
        .bind(fields.notes)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating route: {}", e)))?;

        Ok(route)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting route: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    /// Copia superficial: solo los campos escalares de la ruta.
    /// Los segmentos, logística, participantes, traslados y transacciones
    /// NO se copian.
    pub async fn duplicate(
        &self,
        id: Uuid,
        new_name: Option<String>,
    ) -> Result<Option<Route>, AppError> {
        let new_id = Uuid::new_v4();
        let now = Utc::now();

        let route = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (id, name, description, start_date, end_date, duration_days,
                                status, total_distance, estimated_cost, actual_cost, currency,
                                notes, created_at, updated_at)
            SELECT $2, COALESCE($3, name || ' (Copy)'), description, start_date, end_date,
                   duration_days, status, total_distance, estimated_cost, actual_cost,
                   currency, notes, $4, $4
            FROM routes
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(new_id)
        .bind(new_name)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error duplicating route: {}", e)))?;

        Ok(route)
    }
}
