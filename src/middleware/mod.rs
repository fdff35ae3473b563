//! Middleware del sistema
//!
//! Este módulo contiene el middleware de CORS y trazado de requests.

pub mod cors;

pub use cors::*;
