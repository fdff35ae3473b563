//! Repositorios de acceso a datos
//!
//! Cada repositorio encapsula el SQL de su recurso y expone structs
//! de fila mapeados con sqlx::FromRow.

pub mod accommodation_repository;
pub mod logistics_repository;
pub mod participant_repository;
pub mod route_repository;
pub mod segment_repository;
pub mod stop_repository;
pub mod transaction_repository;
pub mod transfer_repository;
