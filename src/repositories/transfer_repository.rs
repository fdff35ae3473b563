use crate::utils::errors::AppError;
use chrono::NaiveDate;
use sqlx::types::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Transfer {
    pub id: Uuid,
    pub route_id: Uuid,
    pub transfer_date: NaiveDate,
    pub from_location_id: Uuid,
    pub to_location_id: Uuid,
    pub total_cost: Decimal,
    pub notes: Option<String>,
    pub from_location_name: Option<String>,
    pub to_location_name: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TransferVehicle {
    pub id: Uuid,
    pub transfer_id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub driver_pilot_name: Option<String>,
    pub quantity: i32,
    pub cost: Decimal,
    pub is_own_vehicle: bool,
    pub notes: Option<String>,
}

/// Pasajero del traslado con nombre y rol resueltos
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TransferRider {
    pub id: Uuid,
    pub transfer_id: Uuid,
    pub participant_id: Uuid,
    pub role: Option<String>,
    pub participant_name: String,
}

/// Asignación de vehículo a insertar
#[derive(Debug, Clone)]
pub struct NewTransferVehicle {
    pub vehicle_id: Option<Uuid>,
    pub driver_pilot_name: Option<String>,
    pub quantity: i32,
    pub cost: Decimal,
    pub is_own_vehicle: bool,
    pub notes: Option<String>,
}

/// Costo total del traslado: suma de costo x cantidad de cada vehículo
pub fn vehicles_total(vehicles: &[NewTransferVehicle]) -> Decimal {
    vehicles
        .iter()
        .map(|v| v.cost * Decimal::from(v.quantity))
        .sum()
}

const TRANSFER_SELECT: &str = r#"
    SELECT t.*, fl.name AS from_location_name, tl.name AS to_location_name
    FROM route_transfers t
    LEFT JOIN locations fl ON fl.id = t.from_location_id
    LEFT JOIN locations tl ON tl.id = t.to_location_id
"#;

const RIDER_SELECT: &str = r#"
    SELECT tp.id, tp.transfer_id, tp.participant_id, p.role,
           COALESCE(c.full_name, g.full_name, 'Staff') AS participant_name
    FROM transfer_participants tp
    JOIN route_participants p ON p.id = tp.participant_id
    LEFT JOIN clients c ON c.id = p.client_id
    LEFT JOIN guides g ON g.id = p.guide_id
"#;

pub struct TransferRepository {
    pool: PgPool,
}

impl TransferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_route(&self, route_id: Uuid) -> Result<Vec<Transfer>, AppError> {
        let query = format!(
            "{} WHERE t.route_id = $1 ORDER BY t.transfer_date, t.id",
            TRANSFER_SELECT
        );
        let transfers = sqlx::query_as::<_, Transfer>(&query)
            .bind(route_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing transfers: {}", e)))?;

        Ok(transfers)
    }

    pub async fn find_by_id(
        &self,
        id: Uuid,
        route_id: Uuid,
    ) -> Result<Option<Transfer>, AppError> {
        let query = format!("{} WHERE t.id = $1 AND t.route_id = $2", TRANSFER_SELECT);
        let transfer = sqlx::query_as::<_, Transfer>(&query)
            .bind(id)
            .bind(route_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding transfer: {}", e)))?;

        Ok(transfer)
    }

    pub async fn exists(&self, id: Uuid, route_id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM route_transfers WHERE id = $1 AND route_id = $2)",
        )
        .bind(id)
        .bind(route_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error checking transfer: {}", e)))?;

        Ok(result.0)
    }

    pub async fn vehicles_for(&self, transfer_id: Uuid) -> Result<Vec<TransferVehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, TransferVehicle>(
            "SELECT * FROM transfer_vehicles WHERE transfer_id = $1 ORDER BY id",
        )
        .bind(transfer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing transfer vehicles: {}", e)))?;

        Ok(vehicles)
    }

    pub async fn riders_for(&self, transfer_id: Uuid) -> Result<Vec<TransferRider>, AppError> {
        let query = format!("{} WHERE tp.transfer_id = $1 ORDER BY tp.id", RIDER_SELECT);
        let riders = sqlx::query_as::<_, TransferRider>(&query)
            .bind(transfer_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing transfer riders: {}", e)))?;

        Ok(riders)
    }

    /// Insertar el traslado con sus vehículos y pasajeros en una transacción
    pub async fn create(
        &self,
        route_id: Uuid,
        transfer_date: NaiveDate,
        from_location_id: Uuid,
        to_location_id: Uuid,
        notes: Option<String>,
        vehicles: &[NewTransferVehicle],
        participant_ids: &[Uuid],
    ) -> Result<Transfer, AppError> {
        let id = Uuid::new_v4();
        let total = vehicles_total(vehicles);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Error starting transaction: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO route_transfers (id, route_id, transfer_date, from_location_id,
                                         to_location_id, total_cost, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id)
        .bind(route_id)
        .bind(transfer_date)
        .bind(from_location_id)
        .bind(to_location_id)
        .bind(total)
        .bind(notes)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::Database(format!("Error creating transfer: {}", e)))?;

        insert_vehicles(&mut tx, id, vehicles).await?;
        insert_riders(&mut tx, id, participant_ids).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Error committing transfer: {}", e)))?;

        self.find_by_id(id, route_id)
            .await?
            .ok_or_else(|| AppError::Internal("Transfer vanished after insert".to_string()))
    }

    /// Actualizar el traslado reemplazando vehículos y pasajeros por
    /// los conjuntos recibidos, dentro de una transacción.
    pub async fn update(
        &self,
        id: Uuid,
        route_id: Uuid,
        transfer_date: NaiveDate,
        from_location_id: Uuid,
        to_location_id: Uuid,
        notes: Option<String>,
        vehicles: &[NewTransferVehicle],
        participant_ids: &[Uuid],
    ) -> Result<Option<Transfer>, AppError> {
        let total = vehicles_total(vehicles);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Error starting transaction: {}", e)))?;

        let result = sqlx::query(
            r#"
            UPDATE route_transfers
            SET transfer_date = $3, from_location_id = $4, to_location_id = $5,
                total_cost = $6, notes = $7
            WHERE id = $1 AND route_id = $2
            "#,
        )
        .bind(id)
        .bind(route_id)
        .bind(transfer_date)
        .bind(from_location_id)
        .bind(to_location_id)
        .bind(total)
        .bind(notes)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::Database(format!("Error updating transfer: {}", e)))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        sqlx::query("DELETE FROM transfer_vehicles WHERE transfer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Database(format!("Error clearing transfer vehicles: {}", e)))?;

        sqlx::query("DELETE FROM transfer_participants WHERE transfer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Database(format!("Error clearing transfer riders: {}", e)))?;

        insert_vehicles(&mut tx, id, vehicles).await?;
        insert_riders(&mut tx, id, participant_ids).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Error committing transfer update: {}", e)))?;

        self.find_by_id(id, route_id).await
    }

    /// Agregar un vehículo y recalcular el costo total en una transacción
    pub async fn add_vehicle(
        &self,
        transfer_id: Uuid,
        vehicle: NewTransferVehicle,
    ) -> Result<TransferVehicle, AppError> {
        let id = Uuid::new_v4();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Error starting transaction: {}", e)))?;

        let row = sqlx::query_as::<_, TransferVehicle>(
            r#"
            INSERT INTO transfer_vehicles (id, transfer_id, vehicle_id, driver_pilot_name,
                                           quantity, cost, is_own_vehicle, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(transfer_id)
        .bind(vehicle.vehicle_id)
        .bind(vehicle.driver_pilot_name)
        .bind(vehicle.quantity)
        .bind(vehicle.cost)
        .bind(vehicle.is_own_vehicle)
        .bind(vehicle.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::Database(format!("Error adding transfer vehicle: {}", e)))?;

        recompute_total(&mut tx, transfer_id).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Error committing vehicle: {}", e)))?;

        Ok(row)
    }

    /// Quitar un vehículo y recalcular el costo total en una transacción
    pub async fn remove_vehicle(
        &self,
        vehicle_id: Uuid,
        transfer_id: Uuid,
    ) -> Result<bool, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Error starting transaction: {}", e)))?;

        let result = sqlx::query(
            "DELETE FROM transfer_vehicles WHERE id = $1 AND transfer_id = $2",
        )
        .bind(vehicle_id)
        .bind(transfer_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::Database(format!("Error removing transfer vehicle: {}", e)))?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        recompute_total(&mut tx, transfer_id).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Error committing vehicle removal: {}", e)))?;

        Ok(true)
    }

    /// Insert idempotente; devuelve false si el pasajero ya estaba asignado
    pub async fn add_participant(
        &self,
        transfer_id: Uuid,
        participant_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO transfer_participants (id, transfer_id, participant_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (transfer_id, participant_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(transfer_id)
        .bind(participant_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error adding transfer rider: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn remove_participant(
        &self,
        transfer_id: Uuid,
        participant_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM transfer_participants WHERE transfer_id = $1 AND participant_id = $2",
        )
        .bind(transfer_id)
        .bind(participant_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error removing transfer rider: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: Uuid, route_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM route_transfers WHERE id = $1 AND route_id = $2")
            .bind(id)
            .bind(route_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting transfer: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

async fn insert_vehicles(
    tx: &mut Transaction<'_, Postgres>,
    transfer_id: Uuid,
    vehicles: &[NewTransferVehicle],
) -> Result<(), AppError> {
    for vehicle in vehicles {
        sqlx::query(
            r#"
            INSERT INTO transfer_vehicles (id, transfer_id, vehicle_id, driver_pilot_name,
                                           quantity, cost, is_own_vehicle, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(transfer_id)
        .bind(vehicle.vehicle_id)
        .bind(&vehicle.driver_pilot_name)
        .bind(vehicle.quantity)
        .bind(vehicle.cost)
        .bind(vehicle.is_own_vehicle)
        .bind(&vehicle.notes)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::Database(format!("Error adding transfer vehicle: {}", e)))?;
    }
    Ok(())
}

async fn insert_riders(
    tx: &mut Transaction<'_, Postgres>,
    transfer_id: Uuid,
    participant_ids: &[Uuid],
) -> Result<(), AppError> {
    for participant_id in participant_ids {
        sqlx::query(
            r#"
            INSERT INTO transfer_participants (id, transfer_id, participant_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (transfer_id, participant_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(transfer_id)
        .bind(participant_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::Database(format!("Error adding transfer rider: {}", e)))?;
    }
    Ok(())
}

/// Recalcular total_cost desde las filas vigentes de transfer_vehicles
async fn recompute_total(
    tx: &mut Transaction<'_, Postgres>,
    transfer_id: Uuid,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE route_transfers
        SET total_cost = (SELECT COALESCE(SUM(cost * quantity), 0)
                          FROM transfer_vehicles WHERE transfer_id = $1)
        WHERE id = $1
        "#,
    )
    .bind(transfer_id)
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::Database(format!("Error recomputing transfer cost: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(quantity: i32, cost: &str) -> NewTransferVehicle {
        NewTransferVehicle {
            vehicle_id: None,
            driver_pilot_name: None,
            quantity,
            cost: cost.parse().unwrap(),
            is_own_vehicle: false,
            notes: None,
        }
    }

    #[test]
    fn test_vehicles_total_empty() {
        assert_eq!(vehicles_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_vehicles_total_multiplies_quantity() {
        let vehicles = vec![vehicle(2, "150.00"), vehicle(1, "80.50")];
        assert_eq!(vehicles_total(&vehicles), "380.50".parse().unwrap());
    }
}
