//! Modelo de VehicleRecord
//!
//! Este módulo contiene el registro de salud de un vehículo y el estado IA
//! asociado. El JSON usa los nombres que consume el dashboard (`_id`,
//! `vehicleId`, `aiStatus`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Estado IA del vehículo - único conjunto de valores aceptado por el store
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AiStatus {
    Normal,
    Warning,
    Risk,
}

impl AiStatus {
    pub const ALL: [AiStatus; 3] = [AiStatus::Normal, AiStatus::Warning, AiStatus::Risk];

    pub fn as_str(&self) -> &'static str {
        match self {
            AiStatus::Normal => "Normal",
            AiStatus::Warning => "Warning",
            AiStatus::Risk => "Risk",
        }
    }
}

impl fmt::Display for AiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AiStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AiStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| format!("invalid aiStatus value: \"{}\"", s))
    }
}

/// Registro de salud de un vehículo tal como lo persiste el store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_status: Option<AiStatus>,
    pub timestamp: DateTime<Utc>,
}

impl VehicleRecord {
    /// Coincidencia parcial, sin distinguir mayúsculas, sobre `vehicleId`
    pub fn matches_vehicle_id(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.vehicle_id
            .as_deref()
            .map(|id| id.to_lowercase().contains(&needle))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ai_status_parse() {
        assert_eq!("Normal".parse::<AiStatus>().unwrap(), AiStatus::Normal);
        assert_eq!(" Risk ".parse::<AiStatus>().unwrap(), AiStatus::Risk);
        assert!("normal".parse::<AiStatus>().is_err());
        assert!("Critical".parse::<AiStatus>().is_err());
    }

    #[test]
    fn test_record_json_field_names() {
        let record = VehicleRecord {
            id: Uuid::new_v4(),
            vehicle_id: Some("VH-001".to_string()),
            temperature: Some(75.0),
            vibration: Some(2.1),
            ai_status: Some(AiStatus::Warning),
            timestamp: Utc::now(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["_id"], json!(record.id.to_string()));
        assert_eq!(value["vehicleId"], "VH-001");
        assert_eq!(value["aiStatus"], "Warning");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_record_missing_fields_are_omitted() {
        let record = VehicleRecord {
            id: Uuid::new_v4(),
            vehicle_id: None,
            temperature: None,
            vibration: None,
            ai_status: None,
            timestamp: Utc::now(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("aiStatus").is_none());
        assert!(value.get("temperature").is_none());

        let parsed: VehicleRecord = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_record_rejects_unknown_status() {
        let raw = json!({
            "_id": Uuid::new_v4().to_string(),
            "aiStatus": "Critical",
            "timestamp": "2025-01-01T00:00:00Z"
        });
        assert!(serde_json::from_value::<VehicleRecord>(raw).is_err());
    }

    #[test]
    fn test_matches_vehicle_id() {
        let mut record = VehicleRecord {
            id: Uuid::new_v4(),
            vehicle_id: Some("VH-001".to_string()),
            temperature: None,
            vibration: None,
            ai_status: None,
            timestamp: Utc::now(),
        };
        assert!(record.matches_vehicle_id("vh-0"));
        assert!(record.matches_vehicle_id("001"));
        assert!(!record.matches_vehicle_id("TRK"));

        record.vehicle_id = None;
        assert!(!record.matches_vehicle_id("VH"));
    }
}
