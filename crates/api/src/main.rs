use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use salon_api::bootstrap::ensure_admin;
use salon_api::config::{LogFormat, ServerConfig};
use salon_api::router::build_app_router;
use salon_api::state::AppState;
use salon_db::repositories::SessionRepo;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");

    // --- Tracing ---
    let json = config.log_format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salon_api=debug,salon_db=debug,tower_http=debug".into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = salon_db::create_pool(&config.database_url, config.db_max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!(max_connections = config.db_max_connections, "Database connection pool created");

    salon_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    salon_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    match SessionRepo::purge_stale(&pool).await {
        Ok(purged) => tracing::info!(purged, "Purged stale sessions"),
        Err(e) => tracing::warn!(error = %e, "Failed to purge stale sessions"),
    }

    // --- Admin bootstrap ---
    if let Some(admin) = &config.admin_bootstrap {
        match ensure_admin(&pool, admin).await {
            Ok(true) => {}
            Ok(false) => tracing::debug!(username = %admin.username, "Bootstrap admin already present"),
            Err(e) => tracing::error!(error = %e, "Failed to create bootstrap admin"),
        }
    }

    // --- Router ---
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, closing database pool");
    if tokio::time::timeout(Duration::from_secs(config.shutdown_timeout_secs), pool.close())
        .await
        .is_err()
    {
        tracing::warn!("Database pool did not close within the shutdown timeout");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Resolve on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, starting graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
