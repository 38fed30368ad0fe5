//! Server binary: configuration, pool, routes, graceful shutdown.

use contactd::list::{HttpListClient, ListSync};
use contactd::{ratelimit, router, store, AppConfig, AppState, RateLimiter};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("contactd=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    store::ensure_contacts_table(&pool).await?;

    let list: Option<Arc<dyn ListSync>> = match &config.list_api_key {
        Some(key) => Some(Arc::new(HttpListClient::new(
            config.list_api_url.clone(),
            key.clone(),
            config.list_id,
        )?)),
        None => {
            tracing::warn!("LIST_API_KEY is not set; submissions will fail after the insert");
            None
        }
    };

    let state = AppState {
        store: Arc::new(pool.clone()),
        config: Arc::new(config.clone()),
        list,
        limiter: Arc::new(RateLimiter::new(
            ratelimit::MAX_REQUESTS,
            ratelimit::WINDOW,
        )),
    };

    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("closing database pool");
    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
