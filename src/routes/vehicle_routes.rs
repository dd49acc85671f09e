use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::VehicleController;
use crate::dto::{CreateVehicleRequest, ListVehiclesQuery, UpdateVehicleRequest, VehicleListResponse};
use crate::models::VehicleRecord;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{parse_record_id, JsonBody};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route("/vehicles/:id", put(update_vehicle).delete(delete_vehicle))
}

async fn list_vehicles(
    State(state): State<AppState>,
    query: Result<Query<ListVehiclesQuery>, axum::extract::rejection::QueryRejection>,
) -> Result<Json<VehicleListResponse>, AppError> {
    // Una query ilegible se trata como listado sin filtro
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let controller = VehicleController::new(state.store.clone());
    let response = controller.list(&query).await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<VehicleRecord>), AppError> {
    let controller = VehicleController::new(state.store.clone());
    let record = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateVehicleRequest>,
) -> Result<Json<Option<VehicleRecord>>, AppError> {
    let id = parse_record_id(&id)?;
    let controller = VehicleController::new(state.store.clone());
    let updated = controller.update(id, request).await?;
    Ok(Json(updated))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_record_id(&id)?;
    let controller = VehicleController::new(state.store.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
