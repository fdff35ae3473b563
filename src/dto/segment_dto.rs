use crate::repositories::segment_repository::Segment;
use crate::repositories::stop_repository::Stop;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request para crear un segmento; los campos omitidos se calculan
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSegmentRequest {
    pub day_number: Option<i32>,
    pub from_location_id: Option<Uuid>,
    pub to_location_id: Option<Uuid>,
    pub distance: Option<f64>,
    pub segment_order: Option<i32>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Request de reemplazo completo de un segmento
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSegmentRequest {
    pub day_number: Option<i32>,
    pub from_location_id: Option<Uuid>,
    pub to_location_id: Option<Uuid>,
    pub distance: Option<f64>,
    pub segment_order: Option<i32>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Par (id, orden) del endpoint de reordenamiento
#[derive(Debug, Deserialize)]
pub struct SegmentOrderItem {
    pub id: Uuid,
    pub segment_order: i32,
}

#[derive(Debug, Serialize)]
pub struct SegmentResponse {
    pub id: Uuid,
    pub route_id: Uuid,
    pub day_number: i32,
    pub segment_date: Option<NaiveDate>,
    pub from_location_id: Option<Uuid>,
    pub from_location_name: Option<String>,
    pub to_location_id: Option<Uuid>,
    pub to_location_name: Option<String>,
    pub distance: Option<f64>,
    pub segment_order: i32,
    pub notes: Option<String>,
    pub stops: Vec<StopResponse>,
}

impl SegmentResponse {
    pub fn from_segment(segment: Segment, stops: Vec<StopResponse>) -> Self {
        Self {
            id: segment.id,
            route_id: segment.route_id,
            day_number: segment.day_number,
            segment_date: segment.segment_date,
            from_location_id: segment.from_location_id,
            from_location_name: segment.from_location_name,
            to_location_id: segment.to_location_id,
            to_location_name: segment.to_location_name,
            distance: segment
                .distance
                .map(|d| d.to_string().parse().unwrap_or(0.0)),
            segment_order: segment.segment_order,
            notes: segment.notes,
            stops,
        }
    }
}

/// Request para crear una parada
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStopRequest {
    pub location_id: Option<Uuid>,
    pub stop_order: Option<i32>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Par (id, orden) del endpoint de reordenamiento de paradas
#[derive(Debug, Deserialize)]
pub struct StopOrderItem {
    pub id: Uuid,
    pub stop_order: i32,
}

#[derive(Debug, Serialize)]
pub struct StopResponse {
    pub id: Uuid,
    pub segment_id: Uuid,
    pub location_id: Uuid,
    pub location_name: Option<String>,
    pub stop_order: i32,
    pub notes: Option<String>,
}

impl From<Stop> for StopResponse {
    fn from(stop: Stop) -> Self {
        Self {
            id: stop.id,
            segment_id: stop.segment_id,
            location_id: stop.location_id,
            location_name: stop.location_name,
            stop_order: stop.stop_order,
            notes: stop.notes,
        }
    }
}
