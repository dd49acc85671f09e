//! Repositorios
//!
//! Este módulo define el contrato del store de registros de vehículos y sus
//! dos implementaciones: PostgreSQL (producción) y memoria (desarrollo y tests).

pub mod memory_repository;
pub mod vehicle_repository;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::models::VehicleRecord;

pub use memory_repository::MemoryVehicleStore;
pub use vehicle_repository::PgVehicleStore;

/// Máximo de registros devueltos por el listado
pub const LIST_LIMIT: usize = 100;

/// Errores del store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt record {id}: {reason}")]
    Corrupt { id: Uuid, reason: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Operaciones sobre la colección de registros de salud
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Registros más recientes primero (por `timestamp`), como máximo `limit`.
    /// `filter` es una coincidencia parcial sin distinguir mayúsculas sobre `vehicleId`.
    async fn list_recent(
        &self,
        filter: Option<&str>,
        limit: usize,
    ) -> Result<Vec<VehicleRecord>, StoreError>;

    /// Insertar un registro; el store asigna `id` y, si falta, `timestamp`
    async fn insert(&self, request: CreateVehicleRequest) -> Result<VehicleRecord, StoreError>;

    /// Actualización parcial. `None` si el id no existe.
    async fn update(
        &self,
        id: Uuid,
        changes: UpdateVehicleRequest,
    ) -> Result<Option<VehicleRecord>, StoreError>;

    /// Borrado físico. Devuelve si existía un registro.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
