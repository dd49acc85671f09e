use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::time::timeout;
use uuid::Uuid;

use fleet_health_monitor::client::{ApiOperation, ClientError, VehicleApi, VehicleApiClient};
use fleet_health_monitor::config::{EnvironmentConfig, StoreBackend};
use fleet_health_monitor::dashboard::{self, DashboardConfig, FormField};
use fleet_health_monitor::dto::{CreateVehicleRequest, UpdateVehicleRequest};
use fleet_health_monitor::models::AiStatus;
use fleet_health_monitor::repositories::MemoryVehicleStore;
use fleet_health_monitor::routes::create_app;
use fleet_health_monitor::state::AppState;

/// Levantar el backend en un puerto libre y devolver su dirección base
async fn spawn_server() -> (String, Arc<MemoryVehicleStore>) {
    let store = Arc::new(MemoryVehicleStore::new());
    let config = EnvironmentConfig {
        store_backend: StoreBackend::Memory,
        ..EnvironmentConfig::default()
    };
    let app = create_app(AppState::new(store.clone(), config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), store)
}

fn request(vehicle_id: &str, status: AiStatus) -> CreateVehicleRequest {
    CreateVehicleRequest {
        vehicle_id: Some(vehicle_id.to_string()),
        temperature: Some(75.0),
        vibration: Some(2.1),
        ai_status: Some(status),
        timestamp: None,
    }
}

#[tokio::test]
async fn test_client_crud_round() {
    let (base, _store) = spawn_server().await;
    let client = VehicleApiClient::new(base).unwrap();

    let created = client
        .create_vehicle(&request("VH-001", AiStatus::Normal))
        .await
        .unwrap();
    client
        .create_vehicle(&request("VAN-7", AiStatus::Warning))
        .await
        .unwrap();

    let all = client.list_vehicles(None).await.unwrap();
    assert_eq!(all.total, 2);

    let filtered = client.list_vehicles(Some("vh-0")).await.unwrap();
    assert_eq!(filtered.data.len(), 1);
    assert_eq!(filtered.data[0].id, created.id);

    let changes = UpdateVehicleRequest {
        ai_status: Some(AiStatus::Risk),
        ..UpdateVehicleRequest::default()
    };
    let updated = client.update_vehicle(created.id, &changes).await.unwrap();
    assert_eq!(updated.map(|r| r.ai_status), Some(Some(AiStatus::Risk)));

    let missing = client.update_vehicle(Uuid::new_v4(), &changes).await.unwrap();
    assert!(missing.is_none());

    client.delete_vehicle(created.id).await.unwrap();
    client.delete_vehicle(created.id).await.unwrap();
    assert_eq!(client.list_vehicles(None).await.unwrap().total, 1);
}

#[tokio::test]
async fn test_client_errors_are_generic() {
    let (base, store) = spawn_server().await;
    let client = VehicleApiClient::new(base).unwrap();
    store.set_offline(true);

    let err = client.list_vehicles(None).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Status { operation: ApiOperation::Fetch, .. }
    ));
    assert_eq!(err.to_string(), "Failed to fetch vehicle data");

    let err = client
        .create_vehicle(&request("VH-1", AiStatus::Normal))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Status { .. }));
    assert_eq!(err.to_string(), "Failed to create vehicle data");
}

#[tokio::test]
async fn test_client_unreachable_backend() {
    // Puerto reservado y liberado: nadie escucha
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = VehicleApiClient::new(format!("http://{}", addr)).unwrap();
    let err = client.list_vehicles(None).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport { .. }));
    assert_eq!(err.to_string(), "Failed to fetch vehicle data");
}

#[tokio::test]
async fn test_dashboard_against_live_backend() {
    let (base, store) = spawn_server().await;
    let client = Arc::new(VehicleApiClient::new(base.clone()).unwrap());

    let config = DashboardConfig {
        api_base_url: base,
        poll_interval: Duration::from_secs(3600),
        ..DashboardConfig::default()
    };
    let handle = dashboard::mount(client, &config);
    let mut snapshots = handle.subscribe();

    handle.set_form_field(FormField::VehicleId, "VH-001").unwrap();
    handle.set_form_field(FormField::Temperature, "75").unwrap();
    handle.set_form_field(FormField::Vibration, "2.1").unwrap();
    handle.set_form_field(FormField::AiStatus, "Normal").unwrap();
    handle.submit_form().unwrap();

    let snapshot = timeout(
        Duration::from_secs(5),
        snapshots.wait_for(|s| s.records.len() == 1 && !s.loading && !s.adding),
    )
    .await
    .expect("dashboard never showed the new record")
    .unwrap()
    .clone();

    assert_eq!(snapshot.stats.total, 1);
    assert_eq!(snapshot.stats.normal, 1);
    assert_eq!(snapshot.form.vehicle_id, "");
    assert_eq!(store.len().await, 1);

    handle.unmount().await;
}
