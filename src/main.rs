use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use stylematch::config::{LoggingSettings, Settings, StorageBackend};
use stylematch::core::Recommender;
use stylematch::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use stylematch::services::{CatalogStore, CountCache, HistoryStore, InMemoryStore, PostgresClient};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Configuration error: {}", e),
        )
    })?;

    init_logging(&settings.logging);

    info!("Starting Stylematch recommendation service...");
    info!("Configuration loaded successfully");

    let (catalog, history): (Arc<dyn CatalogStore>, Arc<dyn HistoryStore>) =
        match settings.storage.backend {
            StorageBackend::Postgres => {
                let db_max_conn = settings.database.max_connections.unwrap_or(10);

                let postgres = Arc::new(
                    PostgresClient::from_settings(
                        &settings.database.url,
                        Some(db_max_conn),
                        settings.database.min_connections,
                        settings.database.acquire_timeout_secs,
                        settings.database.idle_timeout_secs,
                    )
                    .await
                    .map_err(|e| {
                        error!("Failed to connect to PostgreSQL: {}", e);
                        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
                    })?,
                );

                info!("PostgreSQL client initialized (max: {} connections)", db_max_conn);

                let catalog: Arc<dyn CatalogStore> = postgres.clone();
                let history: Arc<dyn HistoryStore> = postgres;
                (catalog, history)
            }
            StorageBackend::Memory => {
                let seed_path = settings.storage.seed_path.as_deref().ok_or_else(|| {
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        "Configuration error: storage.seed_path is required for the memory backend",
                    )
                })?;

                let memory = Arc::new(InMemoryStore::from_seed_file(seed_path).await.map_err(|e| {
                    error!("Failed to load catalog seed {}: {}", seed_path, e);
                    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
                })?);

                warn!("Using in-memory catalog and history; history is lost on restart");

                let catalog: Arc<dyn CatalogStore> = memory.clone();
                let history: Arc<dyn HistoryStore> = memory;
                (catalog, history)
            }
        };

    let limits = settings.recommendations.limits();
    let counts = CountCache::new(settings.cache.count_cache_size, settings.cache.count_ttl_secs);

    info!(
        "Count cache initialized ({} entries, TTL: {}s)",
        settings.cache.count_cache_size, settings.cache.count_ttl_secs
    );

    let recommender = Recommender::new(catalog, history, limits).with_count_cache(counts);

    info!("Recommender initialized with limits: {:?}", limits);

    let app_state = AppState { recommender };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
