use crate::repositories::logistics_repository::Logistics;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request para crear o reemplazar una línea de logística.
/// Para lunch y extra-cost el item_name reemplaza a entity_id.
#[derive(Debug, Deserialize, Validate)]
pub struct LogisticsRequest {
    pub segment_id: Option<Uuid>,
    pub logistics_type: Option<String>,
    pub entity_id: Option<Uuid>,
    pub entity_type: Option<String>,

    #[validate(length(max = 200))]
    pub item_name: Option<String>,

    pub quantity: Option<i32>,
    pub cost: Option<f64>,
    pub date: Option<NaiveDate>,

    #[validate(length(max = 200))]
    pub driver_pilot_name: Option<String>,

    pub is_own_vehicle: Option<bool>,
    pub vehicle_type: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogisticsResponse {
    pub id: Uuid,
    pub route_id: Uuid,
    pub segment_id: Option<Uuid>,
    pub logistics_type: String,
    pub entity_id: Option<Uuid>,
    pub entity_type: String,
    pub entity_name: Option<String>,
    pub item_name: Option<String>,
    pub quantity: i32,
    pub cost: Option<f64>,
    pub date: Option<NaiveDate>,
    pub driver_pilot_name: Option<String>,
    pub is_own_vehicle: bool,
    pub vehicle_type: Option<String>,
    pub notes: Option<String>,
}

impl LogisticsResponse {
    pub fn from_logistics(item: Logistics, entity_name: Option<String>) -> Self {
        Self {
            id: item.id,
            route_id: item.route_id,
            segment_id: item.segment_id,
            logistics_type: item.logistics_type,
            entity_id: item.entity_id,
            entity_type: item.entity_type,
            entity_name,
            item_name: item.item_name,
            quantity: item.quantity,
            cost: item.cost.map(|c| c.to_string().parse().unwrap_or(0.0)),
            date: item.logistics_date,
            driver_pilot_name: item.driver_pilot_name,
            is_own_vehicle: item.is_own_vehicle,
            vehicle_type: item.vehicle_type,
            notes: item.notes,
        }
    }
}
