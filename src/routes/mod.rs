pub mod vehicle_routes;

use axum::{response::Json, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::dto::HealthResponse;
use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

/// Crear la aplicación completa: rutas de registros, health probe, CORS y trazas
pub fn create_app(state: AppState) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .route("/test", get(test_endpoint))
        .merge(vehicle_routes::create_vehicle_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health probe: no toca el store
async fn test_endpoint() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Backend is working and connected to the record store!".to_string(),
    })
}
