//! Modelos del sistema
//!
//! Este módulo contiene el modelo de registro de salud de vehículos
//! compartido por el backend, el cliente HTTP y el dashboard.

pub mod vehicle;

pub use vehicle::{AiStatus, VehicleRecord};
