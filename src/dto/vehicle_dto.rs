use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AiStatus, VehicleRecord};
use crate::utils::validation::{deserialize_lenient_f64, deserialize_lenient_string};

// Request para crear un registro. Todos los campos son opcionales a nivel de
// transporte; el formulario del dashboard es quien los exige.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub vehicle_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub temperature: Option<f64>,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub vibration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_status: Option<AiStatus>,
    // Si falta, el store asigna la hora de inserción
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

// Request para actualizar un registro (parcial). `timestamp` nunca se edita.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub vehicle_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub temperature: Option<f64>,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub vibration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_status: Option<AiStatus>,
}

impl UpdateVehicleRequest {
    /// Aplicar los campos presentes sobre un registro existente
    pub fn apply_to(&self, record: &mut VehicleRecord) {
        if let Some(vehicle_id) = &self.vehicle_id {
            record.vehicle_id = Some(vehicle_id.clone());
        }
        if let Some(temperature) = self.temperature {
            record.temperature = Some(temperature);
        }
        if let Some(vibration) = self.vibration {
            record.vibration = Some(vibration);
        }
        if let Some(ai_status) = self.ai_status {
            record.ai_status = Some(ai_status);
        }
    }
}

// Query del listado
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListVehiclesQuery {
    #[serde(rename = "vehicleId")]
    pub vehicle_id: Option<String>,
}

impl ListVehiclesQuery {
    /// Término de búsqueda efectivo; vacío o sólo espacios equivale a sin filtro
    pub fn search_term(&self) -> Option<&str> {
        self.vehicle_id
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

// Response del listado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleListResponse {
    pub data: Vec<VehicleRecord>,
    pub total: usize,
}

impl VehicleListResponse {
    pub fn new(data: Vec<VehicleRecord>) -> Self {
        let total = data.len();
        Self { data, total }
    }
}

// Response del health probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}
