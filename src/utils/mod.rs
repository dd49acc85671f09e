//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores y validación
//! de los datos que llegan a la API.

pub mod errors;
pub mod validation;
