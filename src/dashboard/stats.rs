use serde::Serialize;

use crate::models::{AiStatus, VehicleRecord};

/// Conteos por estado IA sobre la lista en memoria. Se recalcula en cada
/// snapshot; no hay caché ni cálculo incremental.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FleetStats {
    pub total: usize,
    pub normal: usize,
    pub warning: usize,
    pub risk: usize,
}

impl FleetStats {
    pub fn from_records(records: &[VehicleRecord]) -> Self {
        let count = |status: AiStatus| {
            records
                .iter()
                .filter(|r| r.ai_status == Some(status))
                .count()
        };

        Self {
            total: records.len(),
            normal: count(AiStatus::Normal),
            warning: count(AiStatus::Warning),
            risk: count(AiStatus::Risk),
        }
    }
}
