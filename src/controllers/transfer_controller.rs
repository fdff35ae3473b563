use crate::dto::transfer_dto::{
    TransferRequest, TransferResponse, TransferRiderResponse, TransferVehicleInput,
    TransferVehicleResponse,
};
use crate::repositories::participant_repository::ParticipantRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::transfer_repository::{
    NewTransferVehicle, Transfer, TransferRepository,
};
use crate::services::EntityResolver;
use crate::utils::errors::AppError;
use crate::utils::validation::{
    optional_decimal, require_value, validate_non_negative, validate_positive,
};
use chrono::NaiveDate;
use sqlx::types::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Campos validados de la cabecera de un traslado
#[derive(Debug)]
struct TransferHeader {
    transfer_date: NaiveDate,
    from_location_id: Uuid,
    to_location_id: Uuid,
}

/// Validar cabecera: fecha y ubicaciones presentes, origen distinto de destino
fn validate_header(request: &TransferRequest) -> Result<TransferHeader, AppError> {
    let transfer_date = require_value(request.transfer_date, "Transfer date is required")?;
    let from_location_id =
        require_value(request.from_location_id, "Origin location is required")?;
    let to_location_id =
        require_value(request.to_location_id, "Destination location is required")?;

    if from_location_id == to_location_id {
        return Err(AppError::Validation(
            "Origin and destination locations must be different".to_string(),
        ));
    }

    Ok(TransferHeader {
        transfer_date,
        from_location_id,
        to_location_id,
    })
}

/// Convertir y validar las asignaciones de vehículos del request
fn convert_vehicles(inputs: &[TransferVehicleInput]) -> Result<Vec<NewTransferVehicle>, AppError> {
    let mut vehicles = Vec::with_capacity(inputs.len());
    for input in inputs {
        let quantity = input.quantity.unwrap_or(1);
        if validate_positive(quantity).is_err() {
            return Err(AppError::Validation(
                "Vehicle quantity must be positive".to_string(),
            ));
        }

        let cost = optional_decimal(input.cost, "Invalid vehicle cost")?.unwrap_or(Decimal::ZERO);
        if validate_non_negative(cost).is_err() {
            return Err(AppError::Validation(
                "Vehicle cost cannot be negative".to_string(),
            ));
        }

        vehicles.push(NewTransferVehicle {
            vehicle_id: input.vehicle_id,
            driver_pilot_name: input.driver_pilot_name.clone(),
            quantity,
            cost,
            is_own_vehicle: input.is_own_vehicle.unwrap_or(false),
            notes: input.notes.clone(),
        });
    }
    Ok(vehicles)
}

pub struct TransferController {
    repository: TransferRepository,
    routes: RouteRepository,
    participants: ParticipantRepository,
    resolver: EntityResolver,
}

impl TransferController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TransferRepository::new(pool.clone()),
            routes: RouteRepository::new(pool.clone()),
            participants: ParticipantRepository::new(pool.clone()),
            resolver: EntityResolver::new(pool),
        }
    }

    /// Armar la response de un traslado con vehículos y pasajeros resueltos
    async fn assemble(&self, transfer: Transfer) -> Result<TransferResponse, AppError> {
        let vehicles = self.repository.vehicles_for(transfer.id).await?;
        let mut vehicle_responses = Vec::with_capacity(vehicles.len());
        for vehicle in vehicles {
            let vehicle_name = match vehicle.vehicle_id {
                Some(vehicle_id) => self.resolver.display_name("vehicle", vehicle_id).await?,
                None => None,
            };
            vehicle_responses.push(TransferVehicleResponse::from_vehicle(vehicle, vehicle_name));
        }

        let riders = self.repository.riders_for(transfer.id).await?;
        let rider_responses = riders.into_iter().map(TransferRiderResponse::from).collect();

        Ok(TransferResponse::from_transfer(
            transfer,
            vehicle_responses,
            rider_responses,
        ))
    }

    /// Todos los pasajeros del request deben pertenecer a la ruta
    async fn check_riders(&self, route_id: Uuid, participant_ids: &[Uuid]) -> Result<(), AppError> {
        for participant_id in participant_ids {
            if !self
                .participants
                .belongs_to_route(*participant_id, route_id)
                .await?
            {
                return Err(AppError::Validation(
                    "Participant does not belong to this route".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub async fn list(&self, route_id: Uuid) -> Result<Vec<TransferResponse>, AppError> {
        if !self.routes.exists(route_id).await? {
            return Err(AppError::NotFound("Route not found".to_string()));
        }

        let transfers = self.repository.find_by_route(route_id).await?;
        let mut responses = Vec::with_capacity(transfers.len());
        for transfer in transfers {
            responses.push(self.assemble(transfer).await?);
        }
        Ok(responses)
    }

    pub async fn create(
        &self,
        route_id: Uuid,
        request: TransferRequest,
    ) -> Result<TransferResponse, AppError> {
        request.validate()?;
        let header = validate_header(&request)?;
        let vehicles = convert_vehicles(request.vehicles.as_deref().unwrap_or(&[]))?;
        let participant_ids = request.participants.unwrap_or_default();

        if !self.routes.exists(route_id).await? {
            return Err(AppError::NotFound("Route not found".to_string()));
        }
        self.check_riders(route_id, &participant_ids).await?;

        let transfer = self
            .repository
            .create(
                route_id,
                header.transfer_date,
                header.from_location_id,
                header.to_location_id,
                request.notes,
                &vehicles,
                &participant_ids,
            )
            .await?;

        self.assemble(transfer).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        route_id: Uuid,
        request: TransferRequest,
    ) -> Result<TransferResponse, AppError> {
        request.validate()?;
        let header = validate_header(&request)?;
        let vehicles = convert_vehicles(request.vehicles.as_deref().unwrap_or(&[]))?;
        let participant_ids = request.participants.unwrap_or_default();

        if !self.routes.exists(route_id).await? {
            return Err(AppError::NotFound("Route not found".to_string()));
        }
        self.check_riders(route_id, &participant_ids).await?;

        let transfer = self
            .repository
            .update(
                id,
                route_id,
                header.transfer_date,
                header.from_location_id,
                header.to_location_id,
                request.notes,
                &vehicles,
                &participant_ids,
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Transfer not found".to_string()))?;

        self.assemble(transfer).await
    }

    pub async fn delete(&self, id: Uuid, route_id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id, route_id).await? {
            return Err(AppError::NotFound("Transfer not found".to_string()));
        }
        Ok(())
    }

    pub async fn add_vehicle(
        &self,
        route_id: Uuid,
        transfer_id: Uuid,
        input: TransferVehicleInput,
    ) -> Result<TransferVehicleResponse, AppError> {
        let mut vehicles = convert_vehicles(std::slice::from_ref(&input))?;
        let vehicle = vehicles.remove(0);

        if !self.repository.exists(transfer_id, route_id).await? {
            return Err(AppError::NotFound("Transfer not found".to_string()));
        }

        let row = self.repository.add_vehicle(transfer_id, vehicle).await?;
        let vehicle_name = match row.vehicle_id {
            Some(vehicle_id) => self.resolver.display_name("vehicle", vehicle_id).await?,
            None => None,
        };
        Ok(TransferVehicleResponse::from_vehicle(row, vehicle_name))
    }

    pub async fn remove_vehicle(
        &self,
        route_id: Uuid,
        transfer_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<(), AppError> {
        if !self.repository.exists(transfer_id, route_id).await? {
            return Err(AppError::NotFound("Transfer not found".to_string()));
        }

        if !self.repository.remove_vehicle(vehicle_id, transfer_id).await? {
            return Err(AppError::NotFound("Transfer vehicle not found".to_string()));
        }
        Ok(())
    }

    /// Alta de pasajero; 400 si no pertenece a la ruta, 409 si ya estaba
    pub async fn add_participant(
        &self,
        route_id: Uuid,
        transfer_id: Uuid,
        participant_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        let participant_id = require_value(participant_id, "Participant is required")?;

        if !self.repository.exists(transfer_id, route_id).await? {
            return Err(AppError::NotFound("Transfer not found".to_string()));
        }
        if !self
            .participants
            .belongs_to_route(participant_id, route_id)
            .await?
        {
            return Err(AppError::Validation(
                "Participant does not belong to this route".to_string(),
            ));
        }

        if !self
            .repository
            .add_participant(transfer_id, participant_id)
            .await?
        {
            return Err(AppError::Conflict(
                "Participant is already assigned to this transfer".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn remove_participant(
        &self,
        route_id: Uuid,
        transfer_id: Uuid,
        participant_id: Uuid,
    ) -> Result<(), AppError> {
        if !self.repository.exists(transfer_id, route_id).await? {
            return Err(AppError::NotFound("Transfer not found".to_string()));
        }

        if !self
            .repository
            .remove_participant(transfer_id, participant_id)
            .await?
        {
            return Err(AppError::NotFound(
                "Participant is not assigned to this transfer".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> TransferRequest {
        TransferRequest {
            transfer_date: NaiveDate::from_ymd_opt(2025, 7, 1),
            from_location_id: Some(Uuid::new_v4()),
            to_location_id: Some(Uuid::new_v4()),
            notes: None,
            vehicles: None,
            participants: None,
        }
    }

    #[test]
    fn test_header_rejects_same_origin_and_destination() {
        let mut request = base_request();
        request.to_location_id = request.from_location_id;
        let err = validate_header(&request).unwrap_err();
        assert!(err.to_string().contains("must be different"));
    }

    #[test]
    fn test_header_requires_date() {
        let mut request = base_request();
        request.transfer_date = None;
        assert!(validate_header(&request).is_err());
    }

    #[test]
    fn test_header_accepts_distinct_locations() {
        let request = base_request();
        let header = validate_header(&request).unwrap();
        assert_ne!(header.from_location_id, header.to_location_id);
    }

    #[test]
    fn test_convert_vehicles_defaults() {
        let input = TransferVehicleInput {
            vehicle_id: None,
            driver_pilot_name: None,
            quantity: None,
            cost: None,
            is_own_vehicle: None,
            notes: None,
        };
        let vehicles = convert_vehicles(&[input]).unwrap();
        assert_eq!(vehicles[0].quantity, 1);
        assert_eq!(vehicles[0].cost, Decimal::ZERO);
        assert!(!vehicles[0].is_own_vehicle);
    }

    #[test]
    fn test_convert_vehicles_rejects_zero_quantity() {
        let input = TransferVehicleInput {
            vehicle_id: None,
            driver_pilot_name: None,
            quantity: Some(0),
            cost: None,
            is_own_vehicle: None,
            notes: None,
        };
        assert!(convert_vehicles(&[input]).is_err());
    }

    #[test]
    fn test_convert_vehicles_rejects_negative_cost() {
        let input = TransferVehicleInput {
            vehicle_id: None,
            driver_pilot_name: None,
            quantity: Some(1),
            cost: Some(-10.0),
            is_own_vehicle: None,
            notes: None,
        };
        assert!(convert_vehicles(&[input]).is_err());
    }
}
