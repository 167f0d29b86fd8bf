use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use campus_connect::config::Settings;
use campus_connect::core::Recommender;
use campus_connect::error::{handle_json_payload_error, handle_path_error, handle_query_payload_error};
use campus_connect::routes::{self, AppState};
use campus_connect::services::{AuthService, CatalogCache, MarketplaceStore, MemoryStore, PostgresStore};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

async fn connect_store(settings: &Settings) -> std::io::Result<Arc<dyn MarketplaceStore>> {
    let db = &settings.database;

    if db.url.is_empty() {
        warn!("No database URL configured, using the in-memory store; data is lost on restart");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = PostgresStore::from_settings(
        &db.url,
        db.max_connections,
        db.min_connections,
        db.acquire_timeout_secs,
        db.idle_timeout_secs,
    )
    .await
    .map_err(|e| {
        error!("Failed to connect to PostgreSQL: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    info!("PostgreSQL store initialized (max: {} connections)", db.max_connections.unwrap_or(10));

    Ok(Arc::new(store))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting Campus Connect API...");

    let recommendation_settings = settings
        .recommendation
        .to_settings()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let store = connect_store(&settings).await?;

    let catalog = Arc::new(CatalogCache::new(
        settings.cache.max_entries,
        settings.cache.catalog_ttl_secs,
    ));

    info!("Catalog cache initialized (TTL: {}s)", settings.cache.catalog_ttl_secs);

    let auth = Arc::new(AuthService::new(
        &settings.auth.jwt_secret,
        settings.auth.token_ttl_hours,
        settings.auth.bcrypt_cost,
        settings.auth.cookie_name.clone(),
    ));

    let recommender = Recommender::new(recommendation_settings);

    info!("Recommender initialized with settings: {:?}", recommendation_settings);

    let app_state = AppState {
        store,
        catalog,
        auth,
        recommender,
    };

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
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
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
