use actix_web::{middleware, web, App, HttpServer};
use skincare_recommender::config::{LoggingSettings, Settings};
use skincare_recommender::core::Recommender;
use skincare_recommender::error::handle_json_payload_error;
use skincare_recommender::models::ScoringWeights;
use skincare_recommender::routes::{self, AppState};
use skincare_recommender::services::catalog_from_settings;
use tracing::{error, info};
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
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);

    info!("Starting skincare recommendation service...");

    let catalog = catalog_from_settings(&settings.catalog.path, settings.catalog.cache_ttl_secs);

    // A broken catalog is reported, not fatal; each request retries the load
    match catalog.load().await {
        Ok(products) => info!(
            "Catalog loaded from {} ({} products, cache TTL: {:?}s)",
            settings.catalog.path,
            products.len(),
            settings.catalog.cache_ttl_secs
        ),
        Err(e) => error!("Catalog at {} could not be loaded: {}", settings.catalog.path, e),
    }

    let weights = ScoringWeights::from(&settings.scoring.weights);
    let recommender = Recommender::new(weights);

    info!("Recommender initialized with weights: {:?}", weights);

    let app_state = AppState {
        catalog,
        recommender,
        default_limit: settings.default_limit(),
        max_limit: settings.max_limit(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let cors_settings = settings.cors.clone();

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(routes::build_cors(&cors_settings))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
