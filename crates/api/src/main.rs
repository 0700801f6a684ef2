use std::net::SocketAddr;
use std::sync::Arc;

use contact_db::store::PgMessageStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use contact_api::config::{DatabaseConfig, ServerConfig};
use contact_api::router::build_app_router;
use contact_api::state::AppState;

const DEFAULT_LOG_FILTER: &str = "contact_api=debug,tower_http=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let db = DatabaseConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        origins = ?config.cors_origins,
        "Loaded configuration",
    );

    // --- Storage ---
    let pool = contact_db::create_pool(&db.url, db.max_connections)
        .await
        .expect("Failed to connect to database");
    contact_db::health_check(&pool)
        .await
        .expect("Database is not answering queries");
    contact_db::run_migrations(&pool)
        .await
        .expect("Failed to apply migrations");
    tracing::info!(max_connections = db.max_connections, "Database ready");

    let state = AppState {
        store: Arc::new(PgMessageStore::new(pool.clone())),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    // --- Serve ---
    let ip = config.host.parse().expect("HOST must be an IP address");
    let addr = SocketAddr::new(ip, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!(%addr, "Contact API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    pool.close().await;
    tracing::info!("Shut down cleanly");
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => tracing::info!("SIGINT received, draining connections"),
        () = terminate => tracing::info!("SIGTERM received, draining connections"),
    }
}
