//! Store en memoria
//!
//! Implementación de `VehicleStore` sin base de datos, usada en desarrollo
//! (`STORE_BACKEND=memory`) y en los tests. Conserva el orden de inserción para
//! desempatar registros con el mismo `timestamp`.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, VehicleStore};
use crate::dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::models::VehicleRecord;

#[derive(Default)]
pub struct MemoryVehicleStore {
    records: RwLock<Vec<VehicleRecord>>,
    offline: AtomicBool,
}

impl MemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simular un store inalcanzable: todas las operaciones fallan mientras esté activo
    pub fn set_offline(&self, offline: bool) {
        log::warn!("🔌 Store en memoria offline={}", offline);
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "memory store is offline".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl VehicleStore for MemoryVehicleStore {
    async fn list_recent(
        &self,
        filter: Option<&str>,
        limit: usize,
    ) -> Result<Vec<VehicleRecord>, StoreError> {
        self.ensure_online()?;
        let records = self.records.read().await;

        // Recorrer al revés + sort estable: a igual timestamp gana el último insertado
        let mut matching: Vec<VehicleRecord> = records
            .iter()
            .rev()
            .filter(|record| filter.map_or(true, |term| record.matches_vehicle_id(term)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        matching.truncate(limit);

        log::debug!(
            "📋 Listado en memoria: {} de {} registros (filtro: {:?})",
            matching.len(),
            records.len(),
            filter
        );
        Ok(matching)
    }

    async fn insert(&self, request: CreateVehicleRequest) -> Result<VehicleRecord, StoreError> {
        self.ensure_online()?;

        let record = VehicleRecord {
            id: Uuid::new_v4(),
            vehicle_id: request.vehicle_id,
            temperature: request.temperature,
            vibration: request.vibration,
            ai_status: request.ai_status,
            timestamp: request.timestamp.unwrap_or_else(Utc::now),
        };

        self.records.write().await.push(record.clone());
        log::info!("💾 Registro {} insertado en memoria", record.id);
        Ok(record)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: UpdateVehicleRequest,
    ) -> Result<Option<VehicleRecord>, StoreError> {
        self.ensure_online()?;
        let mut records = self.records.write().await;

        let updated = records.iter_mut().find(|r| r.id == id).map(|record| {
            changes.apply_to(record);
            record.clone()
        });
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        self.ensure_online()?;
        let mut records = self.records.write().await;

        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AiStatus;
    use chrono::{Duration, TimeZone};

    fn request(vehicle_id: &str, minutes: i64) -> CreateVehicleRequest {
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        CreateVehicleRequest {
            vehicle_id: Some(vehicle_id.to_string()),
            temperature: Some(70.0),
            vibration: Some(1.5),
            ai_status: Some(AiStatus::Normal),
            timestamp: Some(base + Duration::minutes(minutes)),
        }
    }

    #[tokio::test]
    async fn test_list_orders_newest_first_and_truncates() {
        let store = MemoryVehicleStore::new();
        store.insert(request("VH-1", 5)).await.unwrap();
        store.insert(request("VH-2", 1)).await.unwrap();
        store.insert(request("VH-3", 9)).await.unwrap();

        let listed = store.list_recent(None, 2).await.unwrap();
        let ids: Vec<_> = listed.iter().filter_map(|r| r.vehicle_id.clone()).collect();
        assert_eq!(ids, vec!["VH-3", "VH-1"]);
    }

    #[tokio::test]
    async fn test_equal_timestamps_prefer_latest_insert() {
        let store = MemoryVehicleStore::new();
        store.insert(request("first", 0)).await.unwrap();
        store.insert(request("second", 0)).await.unwrap();

        let listed = store.list_recent(None, 10).await.unwrap();
        assert_eq!(listed[0].vehicle_id.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_filter_is_case_insensitive_substring() {
        let store = MemoryVehicleStore::new();
        store.insert(request("VH-001", 0)).await.unwrap();
        store.insert(request("TRK-9", 1)).await.unwrap();

        let listed = store.list_recent(Some("vh"), 10).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].vehicle_id.as_deref(), Some("VH-001"));
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_ids() {
        let store = MemoryVehicleStore::new();
        let missing = Uuid::new_v4();

        assert!(store
            .update(missing, UpdateVehicleRequest::default())
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete(missing).await.unwrap());
    }

    #[tokio::test]
    async fn test_offline_store_fails_every_operation() {
        let store = MemoryVehicleStore::new();
        store.set_offline(true);

        assert!(matches!(
            store.list_recent(None, 10).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.insert(request("VH", 0)).await.is_err());

        store.set_offline(false);
        assert!(store.insert(request("VH", 0)).await.is_ok());
        assert_eq!(store.len().await, 1);
    }
}
