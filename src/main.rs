//! Castaway Draft - Application Entry Point

use std::{net::SocketAddr, sync::Arc};

use redis::Client as RedisClient;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use castaway_draft::{
    config::CONFIG,
    create_router,
    db::{self, PgDraftStore},
    notifications::{EventSink, LogNotificationSender, NotificationWorker},
    scheduler::DraftScheduler,
    services::DraftService,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| CONFIG.server.rust_log.clone().into());
    let registry = tracing_subscriber::registry().with(filter);
    if CONFIG.server.log_format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Castaway Draft server...");

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&CONFIG.database).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    // Initialize Redis connection
    tracing::info!("Connecting to Redis...");
    let redis_client = RedisClient::open(CONFIG.redis.url.as_str())?;
    let redis_conn = redis::aio::ConnectionManager::new(redis_client).await?;

    // Draft events flow to the notification worker
    let (events, event_rx) = EventSink::channel(CONFIG.notifications.queue_capacity);
    let worker = NotificationWorker::new(event_rx, Arc::new(LogNotificationSender));
    tokio::spawn(worker.run());

    let draft_service = Arc::new(DraftService::new(
        Arc::new(PgDraftStore::new(db_pool.clone())),
        events,
        CONFIG.draft.clone(),
    ));

    // Finalize sweep
    let mut scheduler = DraftScheduler::new(CONFIG.draft.clone(), draft_service.clone()).await?;
    scheduler.setup_jobs().await?;
    scheduler.start().await?;

    // Create application state
    let state = AppState::new(db_pool, redis_conn, draft_service, CONFIG.clone());

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    scheduler.shutdown().await?;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
