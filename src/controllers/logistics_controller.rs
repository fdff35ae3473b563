use crate::dto::logistics_dto::{LogisticsRequest, LogisticsResponse};
use crate::repositories::logistics_repository::{
    Logistics, LogisticsFields, LogisticsRepository,
};
use crate::repositories::route_repository::RouteRepository;
use crate::services::EntityResolver;
use crate::utils::errors::AppError;
use crate::utils::validation::{optional_decimal, require_string, validate_positive};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Tipos de logística que llevan item_name en lugar de una entidad
const ITEM_NAME_TYPES: [&str; 2] = ["lunch", "extra-cost"];

/// Resolver entity_name para cada línea con el despacho por tipo
pub async fn resolve_entity_names(
    resolver: &EntityResolver,
    items: Vec<Logistics>,
) -> Result<Vec<LogisticsResponse>, AppError> {
    let mut responses = Vec::with_capacity(items.len());
    for item in items {
        let entity_name = match item.entity_id {
            Some(entity_id) => resolver.display_name(&item.entity_type, entity_id).await?,
            None => None,
        };
        responses.push(LogisticsResponse::from_logistics(item, entity_name));
    }
    Ok(responses)
}

pub struct LogisticsController {
    repository: LogisticsRepository,
    routes: RouteRepository,
    resolver: EntityResolver,
}

impl LogisticsController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: LogisticsRepository::new(pool.clone()),
            routes: RouteRepository::new(pool.clone()),
            resolver: EntityResolver::new(pool),
        }
    }

    fn validate_fields(request: LogisticsRequest) -> Result<LogisticsFields, AppError> {
        let logistics_type =
            require_string(request.logistics_type, "Logistics type is required")?;
        let entity_type = require_string(request.entity_type, "Entity type is required")?;

        // lunch y extra-cost se describen por nombre; el resto referencia una entidad
        let (entity_id, item_name) = if ITEM_NAME_TYPES.contains(&logistics_type.as_str()) {
            let item_name = require_string(
                request.item_name,
                "Item name is required for lunch and extra-cost items",
            )?;
            (request.entity_id, Some(item_name))
        } else {
            let entity_id = request.entity_id.ok_or_else(|| {
                AppError::Validation("Entity is required for this logistics type".to_string())
            })?;
            (Some(entity_id), request.item_name)
        };

        let quantity = request.quantity.unwrap_or(1);
        if validate_positive(quantity).is_err() {
            return Err(AppError::Validation("Quantity must be positive".to_string()));
        }

        let cost = optional_decimal(request.cost, "Invalid cost value")?;

        Ok(LogisticsFields {
            segment_id: request.segment_id,
            logistics_type,
            entity_id,
            entity_type,
            item_name,
            quantity,
            cost,
            logistics_date: request.date,
            driver_pilot_name: request.driver_pilot_name,
            is_own_vehicle: request.is_own_vehicle.unwrap_or(false),
            vehicle_type: request.vehicle_type,
            notes: request.notes,
        })
    }

    pub async fn list(&self, route_id: Uuid) -> Result<Vec<LogisticsResponse>, AppError> {
        if !self.routes.exists(route_id).await? {
            return Err(AppError::NotFound("Route not found".to_string()));
        }

        let items = self.repository.find_by_route(route_id).await?;
        resolve_entity_names(&self.resolver, items).await
    }

    pub async fn create(
        &self,
        route_id: Uuid,
        request: LogisticsRequest,
    ) -> Result<LogisticsResponse, AppError> {
        request.validate()?;
        let fields = Self::validate_fields(request)?;

        if !self.routes.exists(route_id).await? {
            return Err(AppError::NotFound("Route not found".to_string()));
        }

        let item = self.repository.create(route_id, fields).await?;
        let mut responses = resolve_entity_names(&self.resolver, vec![item]).await?;
        Ok(responses.remove(0))
    }

    pub async fn update(
        &self,
        id: Uuid,
        route_id: Uuid,
        request: LogisticsRequest,
    ) -> Result<LogisticsResponse, AppError> {
        request.validate()?;
        let fields = Self::validate_fields(request)?;

        let item = self
            .repository
            .update(id, route_id, fields)
            .await?
            .ok_or_else(|| AppError::NotFound("Logistics item not found".to_string()))?;

        let mut responses = resolve_entity_names(&self.resolver, vec![item]).await?;
        Ok(responses.remove(0))
    }

    pub async fn delete(&self, id: Uuid, route_id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id, route_id).await? {
            return Err(AppError::NotFound("Logistics item not found".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> LogisticsRequest {
        LogisticsRequest {
            segment_id: None,
            logistics_type: Some("transport".to_string()),
            entity_id: Some(Uuid::new_v4()),
            entity_type: Some("vehicle".to_string()),
            item_name: None,
            quantity: None,
            cost: Some(120.0),
            date: None,
            driver_pilot_name: None,
            is_own_vehicle: None,
            vehicle_type: None,
            notes: None,
        }
    }

    #[test]
    fn test_entity_required_for_transport() {
        let mut request = base_request();
        request.entity_id = None;
        let err = LogisticsController::validate_fields(request).unwrap_err();
        assert!(err.to_string().contains("Entity is required"));
    }

    #[test]
    fn test_item_name_required_for_lunch() {
        let mut request = base_request();
        request.logistics_type = Some("lunch".to_string());
        request.entity_id = None;
        let err = LogisticsController::validate_fields(request).unwrap_err();
        assert!(err.to_string().contains("Item name is required"));
    }

    #[test]
    fn test_lunch_with_item_name_passes_without_entity() {
        let mut request = base_request();
        request.logistics_type = Some("extra-cost".to_string());
        request.entity_id = None;
        request.item_name = Some("Park entrance fees".to_string());
        let fields = LogisticsController::validate_fields(request).unwrap();
        assert_eq!(fields.entity_id, None);
        assert_eq!(fields.item_name.as_deref(), Some("Park entrance fees"));
        assert_eq!(fields.quantity, 1);
    }

    #[test]
    fn test_quantity_must_be_positive() {
        let mut request = base_request();
        request.quantity = Some(0);
        let err = LogisticsController::validate_fields(request).unwrap_err();
        assert!(err.to_string().contains("Quantity must be positive"));
    }
}
