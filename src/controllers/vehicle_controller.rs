use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::dto::{CreateVehicleRequest, ListVehiclesQuery, UpdateVehicleRequest, VehicleListResponse};
use crate::models::VehicleRecord;
use crate::repositories::{VehicleStore, LIST_LIMIT};
use crate::utils::errors::{AppError, AppResult};

pub struct VehicleController {
    store: Arc<dyn VehicleStore>,
}

impl VehicleController {
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &ListVehiclesQuery) -> AppResult<VehicleListResponse> {
        let filter = query.search_term();
        // Los fallos de lectura son 500
        let records = self.store.list_recent(filter, LIST_LIMIT).await?;

        debug!("📋 Listado: {} registros (filtro: {:?})", records.len(), filter);
        Ok(VehicleListResponse::new(records))
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<VehicleRecord> {
        let record = self
            .store
            .insert(request)
            .await
            .map_err(AppError::WriteRejected)?;

        info!("✅ Registro creado: {} ({:?})", record.id, record.vehicle_id);
        Ok(record)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> AppResult<Option<VehicleRecord>> {
        let updated = self
            .store
            .update(id, request)
            .await
            .map_err(AppError::WriteRejected)?;

        match &updated {
            Some(record) => info!("✏️ Registro actualizado: {}", record.id),
            None => debug!("🔍 Update sobre id inexistente: {}", id),
        }
        Ok(updated)
    }

    /// Idempotente: borrar un id inexistente también es éxito
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let existed = self
            .store
            .delete(id)
            .await
            .map_err(AppError::WriteRejected)?;

        info!("🗑️ Delete {} (existía: {})", id, existed);
        Ok(())
    }
}
