use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use dotenvy::dotenv;

use car_connect::config::{DatabaseConfig, EnvironmentConfig};
use car_connect::create_app;
use car_connect::database::DatabaseConnection;
use car_connect::repositories::Repositories;
use car_connect::services::NotificationService;
use car_connect::state::AppState;
use car_connect::utils::errors::set_expose_internal_errors;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("car_connect=debug,tower_http=info")),
        )
        .init();

    info!("🚗 CarConnect - Reservas y solicitudes de viaje");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;
    set_expose_internal_errors(!config.is_production());

    let repos = match &config.database_url {
        Some(url) => match DatabaseConnection::connect(&DatabaseConfig::new(url.clone())).await {
            Ok(pool) => Repositories::postgres(pool),
            Err(e) => {
                error!("❌ Error conectando a la base de datos: {:#}", e);
                return Err(e);
            }
        },
        None => {
            if config.is_production() {
                anyhow::bail!("DATABASE_URL must be set in production");
            }
            warn!("⚠️ DATABASE_URL no definida: usando el store en memoria (los datos no persisten)");
            Repositories::in_memory()
        }
    };

    // Barrido de retención de notificaciones
    let sweep = NotificationService::new(repos.notifications.clone()).spawn_retention_sweep(
        config.sweep_interval(),
        config.notification_retention_days,
    );

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app(AppState::new(repos, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health");
    info!("🧑 Renter:");
    info!("   POST /car-renter/cars/:id/book - Reservar coche");
    info!("   GET  /car-renter/cars/:id/availability - Disponibilidad");
    info!("   GET  /car-renter/bookings - Mis reservas");
    info!("   POST /car-renter/bookings/:id/cancel - Cancelar reserva");
    info!("   POST /car-renter/bookings/:id/retry-fan-out, GET /car-renter/bookings/:id/ride-requests");
    info!("🔑 Owner:");
    info!("   GET|POST /car-owner/cars, PUT|DELETE /car-owner/cars/:id");
    info!("   PATCH /car-owner/cars/:id/availability, GET /car-owner/bookings");
    info!("🚕 Driver:");
    info!("   GET|POST /driver/profile, PATCH /driver/toggle-availability");
    info!("   GET  /driver/ride-requests, POST /driver/ride-requests/:id/{{accept,reject,complete}}");
    info!("🔔 Notificaciones: GET /notifications, PATCH /notifications/:id/read, PATCH /notifications/read-all, DELETE /notifications/:id");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
    }

    sweep.abort();
    info!("👋 Servidor terminado");
    Ok(())
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
            info!("🛑 Señal SIGTERM recibida, apagando servidor...");
        },
    }
}
