//! Sistema de manejo de errores
//!
//! Este módulo define los errores del backend de registros de vehículos
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::repositories::StoreError;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    /// Fallo del store en una lectura (listado) - 500
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Fallo del store en una escritura (create/update/delete) - 400
    #[error("Write rejected: {0}")]
    WriteRejected(StoreError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl AppError {
    /// Status HTTP asociado a cada variante
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::WriteRejected(_) | AppError::Validation(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = match self {
            AppError::Store(e) => {
                error!("❌ Error del store: {}", e);
                ErrorResponse {
                    error: e.to_string(),
                    code: "STORE_ERROR",
                    details: None,
                }
            }

            AppError::WriteRejected(e) => {
                warn!("⚠️ Escritura rechazada por el store: {}", e);
                ErrorResponse {
                    error: e.to_string(),
                    code: "WRITE_REJECTED",
                    details: None,
                }
            }

            AppError::Validation(e) => {
                warn!("⚠️ Error de validación: {}", e);
                ErrorResponse {
                    error: e.to_string(),
                    code: "VALIDATION_ERROR",
                    details: Some(json!(e)),
                }
            }

            AppError::BadRequest(msg) => {
                warn!("⚠️ Bad request: {}", msg);
                ErrorResponse {
                    error: msg,
                    code: "BAD_REQUEST",
                    details: None,
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación sobre un campo
pub fn validation_error(field: &'static str, error: validator::ValidationError) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);
    AppError::Validation(errors)
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_by_operation() {
        let read = AppError::Store(StoreError::Unavailable("down".into()));
        let write = AppError::WriteRejected(StoreError::Unavailable("down".into()));

        assert_eq!(read.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(write.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validation_error_is_client_error() {
        let err = validation_error("id", validator::ValidationError::new("uuid"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(bad_request_error("nope").status_code(), StatusCode::BAD_REQUEST);
    }
}
