//! Cliente HTTP para la API de registros de vehículos
//!
//! Traducción directa de cada intención del dashboard a una llamada HTTP.
//! Sin reintentos, sin timeout propio y sin cancelación: una petición lenta
//! bloquea sólo la acción que la lanzó.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::fmt;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleListResponse};
use crate::models::VehicleRecord;

/// Dirección base por defecto del backend
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Operación de la API, usada en los mensajes de error genéricos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOperation {
    Fetch,
    Create,
    Update,
    Delete,
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            ApiOperation::Fetch => "fetch",
            ApiOperation::Create => "create",
            ApiOperation::Update => "update",
            ApiOperation::Delete => "delete",
        };
        f.write_str(verb)
    }
}

/// Errores del cliente. El mensaje nunca incluye el payload de error del backend.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to {operation} vehicle data")]
    Status {
        operation: ApiOperation,
        status: StatusCode,
    },

    #[error("Failed to {operation} vehicle data")]
    Transport {
        operation: ApiOperation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Setup(#[source] reqwest::Error),
}

/// Contrato del que depende el dashboard
#[async_trait]
pub trait VehicleApi: Send + Sync + 'static {
    async fn list_vehicles(
        &self,
        vehicle_id: Option<&str>,
    ) -> Result<VehicleListResponse, ClientError>;

    async fn create_vehicle(
        &self,
        request: &CreateVehicleRequest,
    ) -> Result<VehicleRecord, ClientError>;

    async fn update_vehicle(
        &self,
        id: Uuid,
        request: &UpdateVehicleRequest,
    ) -> Result<Option<VehicleRecord>, ClientError>;

    async fn delete_vehicle(&self, id: Uuid) -> Result<(), ClientError>;
}

/// Cliente reqwest contra una dirección base fija
#[derive(Clone)]
pub struct VehicleApiClient {
    client: Client,
    base_url: String,
}

impl VehicleApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder().build().map_err(ClientError::Setup)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL del listado; un término vacío no se envía
    pub fn list_url(&self, vehicle_id: Option<&str>) -> String {
        match vehicle_id.filter(|term| !term.is_empty()) {
            Some(term) => format!(
                "{}/vehicles?vehicleId={}",
                self.base_url,
                urlencoding::encode(term)
            ),
            None => format!("{}/vehicles", self.base_url),
        }
    }

    fn record_url(&self, id: Uuid) -> String {
        format!("{}/vehicles/{}", self.base_url, id)
    }

    async fn send(
        &self,
        operation: ApiOperation,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Transport { operation, source })?;

        let status = response.status();
        debug!("🌐 {} -> {}", operation, status);
        if !status.is_success() {
            return Err(ClientError::Status { operation, status });
        }
        Ok(response)
    }
}

#[async_trait]
impl VehicleApi for VehicleApiClient {
    async fn list_vehicles(
        &self,
        vehicle_id: Option<&str>,
    ) -> Result<VehicleListResponse, ClientError> {
        let operation = ApiOperation::Fetch;
        let response = self
            .send(operation, self.client.get(self.list_url(vehicle_id)))
            .await?;
        response
            .json()
            .await
            .map_err(|source| ClientError::Transport { operation, source })
    }

    async fn create_vehicle(
        &self,
        request: &CreateVehicleRequest,
    ) -> Result<VehicleRecord, ClientError> {
        let operation = ApiOperation::Create;
        let url = format!("{}/vehicles", self.base_url);
        let response = self
            .send(operation, self.client.post(url).json(request))
            .await?;
        response
            .json()
            .await
            .map_err(|source| ClientError::Transport { operation, source })
    }

    async fn update_vehicle(
        &self,
        id: Uuid,
        request: &UpdateVehicleRequest,
    ) -> Result<Option<VehicleRecord>, ClientError> {
        let operation = ApiOperation::Update;
        let response = self
            .send(operation, self.client.put(self.record_url(id)).json(request))
            .await?;
        response
            .json()
            .await
            .map_err(|source| ClientError::Transport { operation, source })
    }

    async fn delete_vehicle(&self, id: Uuid) -> Result<(), ClientError> {
        self.send(ApiOperation::Delete, self.client.delete(self.record_url(id)))
            .await?;
        Ok(())
    }
}
