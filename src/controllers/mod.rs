//! Controllers de negocio
//!
//! Validación, reglas de dominio y orquestación entre repositorios.

pub mod accommodation_controller;
pub mod logistics_controller;
pub mod participant_controller;
pub mod route_controller;
pub mod segment_controller;
pub mod stop_controller;
pub mod transaction_controller;
pub mod transfer_controller;
