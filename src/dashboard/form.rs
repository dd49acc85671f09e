//! Formulario de alta de registros
//!
//! Los campos se guardan como texto, igual que los inputs del formulario, y
//! se convierten a número sólo al enviar.

use std::str::FromStr;

use validator::{Validate, ValidationErrors};

use crate::dto::CreateVehicleRequest;
use crate::models::AiStatus;
use crate::utils::validation::{validate_not_blank, validate_numeric};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    VehicleId,
    Temperature,
    Vibration,
    AiStatus,
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vehicleId" => Ok(FormField::VehicleId),
            "temperature" => Ok(FormField::Temperature),
            "vibration" => Ok(FormField::Vibration),
            "aiStatus" => Ok(FormField::AiStatus),
            other => Err(format!("unknown form field: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct VehicleForm {
    #[validate(custom = "validate_not_blank")]
    pub vehicle_id: String,
    #[validate(custom = "validate_numeric")]
    pub temperature: String,
    #[validate(custom = "validate_numeric")]
    pub vibration: String,
    pub ai_status: AiStatus,
}

impl Default for VehicleForm {
    fn default() -> Self {
        Self {
            vehicle_id: String::new(),
            temperature: String::new(),
            vibration: String::new(),
            ai_status: AiStatus::Normal,
        }
    }
}

impl VehicleForm {
    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<(), String> {
        match field {
            FormField::VehicleId => self.vehicle_id = value.to_string(),
            FormField::Temperature => self.temperature = value.to_string(),
            FormField::Vibration => self.vibration = value.to_string(),
            FormField::AiStatus => self.ai_status = value.parse()?,
        }
        Ok(())
    }

    /// Validar y convertir a la request de creación (temperatura y vibración a número)
    pub fn to_create_request(&self) -> Result<CreateVehicleRequest, ValidationErrors> {
        self.validate()?;

        Ok(CreateVehicleRequest {
            vehicle_id: Some(self.vehicle_id.trim().to_string()),
            temperature: self.temperature.trim().parse().ok(),
            vibration: self.vibration.trim().parse().ok(),
            ai_status: Some(self.ai_status),
            timestamp: None,
        })
    }
}
