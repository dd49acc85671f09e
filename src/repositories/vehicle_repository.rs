use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{StoreError, VehicleStore};
use crate::dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::models::{AiStatus, VehicleRecord};

// Fila tal como sale de vehicle_records
#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: Uuid,
    vehicle_id: Option<String>,
    temperature: Option<f64>,
    vibration: Option<f64>,
    ai_status: Option<String>,
    timestamp: DateTime<Utc>,
}

impl TryFrom<VehicleRow> for VehicleRecord {
    type Error = StoreError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        let ai_status = row
            .ai_status
            .as_deref()
            .map(str::parse::<AiStatus>)
            .transpose()
            .map_err(|reason| StoreError::Corrupt { id: row.id, reason })?;

        Ok(VehicleRecord {
            id: row.id,
            vehicle_id: row.vehicle_id,
            temperature: row.temperature,
            vibration: row.vibration,
            ai_status,
            timestamp: row.timestamp,
        })
    }
}

/// Escapar los comodines de LIKE para que el término se busque literal
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub struct PgVehicleStore {
    pool: PgPool,
}

impl PgVehicleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for PgVehicleStore {
    async fn list_recent(
        &self,
        filter: Option<&str>,
        limit: usize,
    ) -> Result<Vec<VehicleRecord>, StoreError> {
        let pattern = filter.map(|term| format!("%{}%", escape_like(term)));

        let rows = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT id, vehicle_id, temperature, vibration, ai_status, timestamp
            FROM vehicle_records
            WHERE ($1::TEXT IS NULL OR vehicle_id ILIKE $1 ESCAPE '\')
            ORDER BY timestamp DESC
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(VehicleRecord::try_from).collect()
    }

    async fn insert(&self, request: CreateVehicleRequest) -> Result<VehicleRecord, StoreError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            INSERT INTO vehicle_records (id, vehicle_id, temperature, vibration, ai_status, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, vehicle_id, temperature, vibration, ai_status, timestamp
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.vehicle_id)
        .bind(request.temperature)
        .bind(request.vibration)
        .bind(request.ai_status.map(|s| s.as_str()))
        .bind(request.timestamp.unwrap_or_else(Utc::now))
        .fetch_one(&self.pool)
        .await?;

        VehicleRecord::try_from(row)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: UpdateVehicleRequest,
    ) -> Result<Option<VehicleRecord>, StoreError> {
        // Un único UPDATE: la atomicidad por registro la da Postgres
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            UPDATE vehicle_records
            SET vehicle_id = COALESCE($2, vehicle_id),
                temperature = COALESCE($3, temperature),
                vibration = COALESCE($4, vibration),
                ai_status = COALESCE($5, ai_status)
            WHERE id = $1
            RETURNING id, vehicle_id, temperature, vibration, ai_status, timestamp
            "#,
        )
        .bind(id)
        .bind(changes.vehicle_id)
        .bind(changes.temperature)
        .bind(changes.vibration)
        .bind(changes.ai_status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await?;

        row.map(VehicleRecord::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM vehicle_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
