use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fleet_health_monitor::config::{DatabaseConfig, EnvironmentConfig, StoreBackend};
use fleet_health_monitor::database::DatabaseConnection;
use fleet_health_monitor::repositories::{MemoryVehicleStore, PgVehicleStore, VehicleStore};
use fleet_health_monitor::routes::create_app;
use fleet_health_monitor::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚚 Fleet Health Monitor - API de registros de vehículos");
    info!("======================================================");

    let config = EnvironmentConfig::from_env()?;
    let store = build_store(&config).await?;

    let app = create_app(AppState::new(store, config.clone()));

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{} ({})", addr, config.environment);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /test - Health probe");
    info!("   GET    /vehicles - Listar registros (?vehicleId=...)");
    info!("   POST   /vehicles - Crear registro");
    info!("   PUT    /vehicles/:id - Actualizar registro");
    info!("   DELETE /vehicles/:id - Eliminar registro");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Servidor terminó con error: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Construir el store según `STORE_BACKEND`
async fn build_store(config: &EnvironmentConfig) -> Result<Arc<dyn VehicleStore>> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let connection = match DatabaseConnection::connect(&db_config).await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(anyhow::anyhow!("Error de base de datos: {}", e));
                }
            };
            connection.run_migrations().await?;
            Ok(Arc::new(PgVehicleStore::new(connection.pool().clone())))
        }
        StoreBackend::Memory => {
            if config.is_production() {
                warn!("⚠️ Store en memoria en producción: los datos se pierden al reiniciar");
            }
            info!("🧠 Usando store en memoria");
            Ok(Arc::new(MemoryVehicleStore::new()))
        }
    }
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
