use crate::repositories::transfer_repository::{Transfer, TransferRider, TransferVehicle};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Asignación de vehículo dentro de un traslado
#[derive(Debug, Deserialize)]
pub struct TransferVehicleInput {
    pub vehicle_id: Option<Uuid>,
    pub driver_pilot_name: Option<String>,
    pub quantity: Option<i32>,
    pub cost: Option<f64>,
    pub is_own_vehicle: Option<bool>,
    pub notes: Option<String>,
}

/// Request para crear o reemplazar un traslado con sus conjuntos hijos
#[derive(Debug, Deserialize, Validate)]
pub struct TransferRequest {
    pub transfer_date: Option<NaiveDate>,
    pub from_location_id: Option<Uuid>,
    pub to_location_id: Option<Uuid>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,

    pub vehicles: Option<Vec<TransferVehicleInput>>,
    pub participants: Option<Vec<Uuid>>,
}

/// Request del endpoint de asignación de un pasajero
#[derive(Debug, Deserialize)]
pub struct AddTransferParticipantRequest {
    pub participant_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct TransferVehicleResponse {
    pub id: Uuid,
    pub transfer_id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub vehicle_name: Option<String>,
    pub driver_pilot_name: Option<String>,
    pub quantity: i32,
    pub cost: f64,
    pub is_own_vehicle: bool,
    pub notes: Option<String>,
}

impl TransferVehicleResponse {
    pub fn from_vehicle(vehicle: TransferVehicle, vehicle_name: Option<String>) -> Self {
        Self {
            id: vehicle.id,
            transfer_id: vehicle.transfer_id,
            vehicle_id: vehicle.vehicle_id,
            vehicle_name,
            driver_pilot_name: vehicle.driver_pilot_name,
            quantity: vehicle.quantity,
            cost: vehicle.cost.to_string().parse().unwrap_or(0.0),
            is_own_vehicle: vehicle.is_own_vehicle,
            notes: vehicle.notes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransferRiderResponse {
    pub id: Uuid,
    pub transfer_id: Uuid,
    pub participant_id: Uuid,
    pub participant_name: String,
    pub role: Option<String>,
}

impl From<TransferRider> for TransferRiderResponse {
    fn from(rider: TransferRider) -> Self {
        Self {
            id: rider.id,
            transfer_id: rider.transfer_id,
            participant_id: rider.participant_id,
            participant_name: rider.participant_name,
            role: rider.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub id: Uuid,
    pub route_id: Uuid,
    pub transfer_date: NaiveDate,
    pub from_location_id: Uuid,
    pub from_location_name: Option<String>,
    pub to_location_id: Uuid,
    pub to_location_name: Option<String>,
    pub total_cost: f64,
    pub notes: Option<String>,
    pub vehicles: Vec<TransferVehicleResponse>,
    pub participants: Vec<TransferRiderResponse>,
}

impl TransferResponse {
    pub fn from_transfer(
        transfer: Transfer,
        vehicles: Vec<TransferVehicleResponse>,
        participants: Vec<TransferRiderResponse>,
    ) -> Self {
        Self {
            id: transfer.id,
            route_id: transfer.route_id,
            transfer_date: transfer.transfer_date,
            from_location_id: transfer.from_location_id,
            from_location_name: transfer.from_location_name,
            to_location_id: transfer.to_location_id,
            to_location_name: transfer.to_location_name,
            total_cost: transfer.total_cost.to_string().parse().unwrap_or(0.0),
            notes: transfer.notes,
            vehicles,
            participants,
        }
    }
}
