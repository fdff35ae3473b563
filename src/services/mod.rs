//! Servicios transversales del sistema

pub mod entity_resolver;

pub use entity_resolver::{EntityResolver, EntityType};
