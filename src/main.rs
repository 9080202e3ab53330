use std::sync::Arc;

use aapda_mitra::core::config::{Config, StoreConfig};
use aapda_mitra::core::{database, server};
use aapda_mitra::features::reports::{
    MemoryReportStore, PgReportStore, ReportService, ReportStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = worker_threads(std::env::var("TOKIO_WORKER_THREADS").ok().as_deref());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

/// Worker count from `TOKIO_WORKER_THREADS`; zero or unparsable falls back to the core count
fn worker_threads(configured: Option<&str>) -> usize {
    configured
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        })
}

async fn open_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn ReportStore>> {
    match config {
        StoreConfig::Postgres(db) => {
            let pool = database::create_pool(db).await?;
            tracing::info!("Database connection pool created");

            tracing::info!("Running database migrations...");
            database::run_migrations(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
            tracing::info!("Database migrations completed successfully");

            Ok(Arc::new(PgReportStore::new(pool)))
        }
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory report store; reports are lost on restart");
            Ok(Arc::new(MemoryReportStore::new()))
        }
    }
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        "Configuration loaded: store={:?}, tokio_worker_threads={}, pid={}",
        config.store.kind(),
        worker_threads,
        std::process::id()
    );

    let store = open_store(&config.store).await?;
    let report_service = Arc::new(ReportService::new(store));
    tracing::info!("Report service initialized");

    let app = server::build_router(&config.app, &config.swagger, report_service);

    let addr = config.app.server_address();
    let listener = server::bind_listener(&addr)?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
