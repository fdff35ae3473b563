use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use tour_logistics::config::environment::EnvironmentConfig;
use tour_logistics::database::DatabaseConnection;
use tour_logistics::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use tour_logistics::routes::create_router;
use tour_logistics::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env();

    // Configurar logging
    let level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🧭 Tour Logistics - API de planificación de rutas");
    info!("=================================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    db_connection.run_migrations().await?;
    let pool = db_connection.pool().clone();

    // Crear router de la API
    let app_state = AppState::new(pool, config.clone());

    let cors = if config.allows_any_origin() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app = create_router(app_state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🗺  Rutas:");
    info!("   GET  /routes - Listar rutas");
    info!("   POST /routes - Crear ruta");
    info!("   GET  /routes/:id - Agregado completo de la ruta");
    info!("   PUT  /routes/:id - Actualizar ruta");
    info!("   DELETE /routes/:id - Eliminar ruta");
    info!("   POST /routes/:id/duplicate - Duplicar ruta (copia superficial)");
    info!("📅 Segmentos y paradas:");
    info!("   GET/POST /routes/:id/segments");
    info!("   PUT  /routes/:id/segments/reorder");
    info!("   PUT/DELETE /routes/:id/segments/:seg_id");
    info!("   GET/POST /routes/:id/segments/:seg_id/stops (+ /reorder)");
    info!("🏨 Alojamientos:");
    info!("   GET/POST /routes/:id/segments/:seg_id/accommodations");
    info!("   POST/PUT/DELETE .../accommodations/:acc_id/rooms/:room_id");
    info!("🚚 Logística:");
    info!("   GET/POST /routes/:id/logistics");
    info!("   PUT/DELETE /routes/:id/logistics/:log_id");
    info!("👥 Participantes:");
    info!("   GET/POST /routes/:id/participants");
    info!("   PUT  /routes/:id/participants/:p_id/segments");
    info!("   POST/DELETE /routes/:id/segments/:seg_id/participants/:p_id");
    info!("🚐 Traslados:");
    info!("   GET/POST /routes/:id/transfers");
    info!("   PUT/DELETE /routes/:id/transfers/:t_id");
    info!("   POST/DELETE .../transfers/:t_id/vehicles[/:v_id]");
    info!("   POST/DELETE .../transfers/:t_id/participants[/:p_id]");
    info!("💰 Transacciones:");
    info!("   GET/POST /routes/:id/transactions");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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
