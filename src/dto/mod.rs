//! DTOs de la API
//!
//! Requests y responses por recurso, más la respuesta genérica.

pub mod accommodation_dto;
pub mod logistics_dto;
pub mod participant_dto;
pub mod route_dto;
pub mod segment_dto;
pub mod transaction_dto;
pub mod transfer_dto;

use serde::Serialize;

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
