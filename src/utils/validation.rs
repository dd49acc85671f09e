//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y coerción de tipos en los bodies de la API.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::{de, de::DeserializeOwned, Deserialize, Deserializer};
use uuid::Uuid;
use validator::ValidationError;

use super::errors::{bad_request_error, validation_error, AppError, AppResult};

/// Validar y convertir string a UUID
pub fn validate_uuid(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        let mut error = ValidationError::new("uuid");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Parsear el identificador de un registro recibido en la ruta
pub fn parse_record_id(raw: &str) -> AppResult<Uuid> {
    validate_uuid(raw).map_err(|e| validation_error("id", e))
}

/// Validar que un string sea un número finito
pub fn validate_numeric(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(()),
        _ => {
            let mut error = ValidationError::new("numeric");
            error.add_param("value".into(), &value.to_string());
            Err(error)
        }
    }
}

/// Validar que un texto no quede vacío tras quitar espacios
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Deserializar un número aceptando también strings numéricos ("75" -> 75.0).
/// Un string vacío o `null` equivale a campo ausente.
pub fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            match trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Some(n)),
                _ => Err(de::Error::custom(format!(
                    "invalid number value: \"{}\"",
                    text
                ))),
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
}

/// Deserializar un texto aceptando también números y booleanos (42 -> "42").
/// `null` equivale a campo ausente.
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::Text(text) => text,
        Scalar::Integer(n) => n.to_string(),
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

/// Extractor JSON que convierte los rechazos de axum en `AppError::BadRequest`,
/// de modo que un body mal formado responde 400 y no 422.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| bad_request_error(&rejection.body_text()))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Reading {
        #[serde(default, deserialize_with = "deserialize_lenient_f64")]
        value: Option<f64>,
    }

    fn read(json: &str) -> Result<Option<f64>, serde_json::Error> {
        serde_json::from_str::<Reading>(json).map(|r| r.value)
    }

    #[test]
    fn test_lenient_number_coercion() {
        assert_eq!(read(r#"{"value": 75}"#).unwrap(), Some(75.0));
        assert_eq!(read(r#"{"value": 2.1}"#).unwrap(), Some(2.1));
        assert_eq!(read(r#"{"value": "75"}"#).unwrap(), Some(75.0));
        assert_eq!(read(r#"{"value": " 2.5 "}"#).unwrap(), Some(2.5));
        assert_eq!(read(r#"{"value": ""}"#).unwrap(), None);
        assert_eq!(read(r#"{"value": null}"#).unwrap(), None);
        assert_eq!(read(r#"{}"#).unwrap(), None);
    }

    #[test]
    fn test_lenient_number_rejects_garbage() {
        assert!(read(r#"{"value": "hot"}"#).is_err());
        assert!(read(r#"{"value": "NaN"}"#).is_err());
        assert!(read(r#"{"value": true}"#).is_err());
    }

    #[derive(Debug, Deserialize)]
    struct Label {
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        value: Option<String>,
    }

    fn label(json: &str) -> Result<Option<String>, serde_json::Error> {
        serde_json::from_str::<Label>(json).map(|l| l.value)
    }

    #[test]
    fn test_lenient_string_coercion() {
        assert_eq!(label(r#"{"value": "VH-1"}"#).unwrap().as_deref(), Some("VH-1"));
        assert_eq!(label(r#"{"value": 42}"#).unwrap().as_deref(), Some("42"));
        assert_eq!(label(r#"{"value": 2.5}"#).unwrap().as_deref(), Some("2.5"));
        assert_eq!(label(r#"{"value": true}"#).unwrap().as_deref(), Some("true"));
        assert_eq!(label(r#"{"value": null}"#).unwrap(), None);
        assert_eq!(label(r#"{}"#).unwrap(), None);
        assert!(label(r#"{"value": ["VH"]}"#).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(validate_uuid(&id.to_string()).unwrap(), id);
        assert!(validate_uuid("not-a-uuid").is_err());
        assert!(parse_record_id("123").is_err());
    }

    #[test]
    fn test_validate_numeric() {
        assert!(validate_numeric("12.5").is_ok());
        assert!(validate_numeric("-3").is_ok());
        assert!(validate_numeric("").is_err());
        assert!(validate_numeric("abc").is_err());
        assert!(validate_numeric("inf").is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("VH-1").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
    }
}
