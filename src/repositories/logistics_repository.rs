use crate::utils::errors::AppError;
use chrono::NaiveDate;
use sqlx::types::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Logistics {
    pub id: Uuid,
    pub route_id: Uuid,
    pub segment_id: Option<Uuid>,
    pub logistics_type: String,
    pub entity_id: Option<Uuid>,
    pub entity_type: String,
    pub item_name: Option<String>,
    pub quantity: i32,
    pub cost: Option<Decimal>,
    pub logistics_date: Option<NaiveDate>,
    pub driver_pilot_name: Option<String>,
    pub is_own_vehicle: bool,
    pub vehicle_type: Option<String>,
    pub notes: Option<String>,
}

/// Campos de una línea de logística para create/update
#[derive(Debug)]
pub struct LogisticsFields {
    pub segment_id: Option<Uuid>,
    pub logistics_type: String,
    pub entity_id: Option<Uuid>,
    pub entity_type: String,
    pub item_name: Option<String>,
    pub quantity: i32,
    pub cost: Option<Decimal>,
    pub logistics_date: Option<NaiveDate>,
    pub driver_pilot_name: Option<String>,
    pub is_own_vehicle: bool,
    pub vehicle_type: Option<String>,
    pub notes: Option<String>,
}

pub struct LogisticsRepository {
    pool: PgPool,
}

impl LogisticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_route(&self, route_id: Uuid) -> Result<Vec<Logistics>, AppError> {
        let items = sqlx::query_as::<_, Logistics>(
            "SELECT * FROM route_logistics WHERE route_id = $1 ORDER BY logistics_date, id",
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing logistics: {}", e)))?;

        Ok(items)
    }

    pub async fn create(
        &self,
        route_id: Uuid,
        fields: LogisticsFields,
    ) -> Result<Logistics, AppError> {
        let id = Uuid::new_v4();

        let item = sqlx::query_as::<_, Logistics>(
            r#"
            INSERT INTO route_logistics (id, route_id, segment_id, logistics_type, entity_id,
                                         entity_type, item_name, quantity, cost, logistics_date,
                                         driver_pilot_name, is_own_vehicle, vehicle_type, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(route_id)
        .bind(fields.segment_id)
        .bind(fields.logistics_type)
        .bind(fields.entity_id)
        .bind(fields.entity_type)
        .bind(fields.item_name)
        .bind(fields.quantity)
        .bind(fields.cost)
        .bind(fields.logistics_date)
        .bind(fields.driver_pilot_name)
        .bind(fields.is_own_vehicle)
        .bind(fields.vehicle_type)
        .bind(fields.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating logistics item: {}", e)))?;

        Ok(item)
    }

    pub async fn update(
        &self,
        id: Uuid,
        route_id: Uuid,
        fields: LogisticsFields,
    ) -> Result<Option<Logistics>, AppError> {
        let item = sqlx::query_as::<_, Logistics>(
            r#"
            UPDATE route_logistics
            SET segment_id = $3, logistics_type = $4, entity_id = $5, entity_type = $6,
                item_name = $7, quantity = $8, cost = $9, logistics_date = $10,
                driver_pilot_name = $11, is_own_vehicle = $12, vehicle_type = $13, notes = $14
            WHERE id = $1 AND route_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(route_id)
        .bind(fields.segment_id)
        .bind(fields.logistics_type)
        .bind(fields.entity_id)
        .bind(fields.entity_type)
        .bind(fields.item_name)
        .bind(fields.quantity)
        .bind(fields.cost)
        .bind(fields.logistics_date)
        .bind(fields.driver_pilot_name)
        .bind(fields.is_own_vehicle)
        .bind(fields.vehicle_type)
        .bind(fields.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating logistics item: {}", e)))?;

        Ok(item)
    }

    pub async fn delete(&self, id: Uuid, route_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM route_logistics WHERE id = $1 AND route_id = $2")
            .bind(id)
            .bind(route_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting logistics item: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
