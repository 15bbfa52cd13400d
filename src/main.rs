use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use std::sync::Arc;
use tracing::{info, warn, error};
use tracing_subscriber::EnvFilter;

use sugar_match::config::Settings;
use sugar_match::core::Explorer;
use sugar_match::models::ErrorResponse;
use sugar_match::routes::{self, AppState};
use sugar_match::services::{CacheManager, PostgresClient, ProfileRepository};

/// JSON error for malformed payloads and query strings
#[derive(Debug)]
struct JsonError(ErrorResponse);

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    info!("JSON payload error on {}: {}", req.path(), err);
    JsonError(ErrorResponse::new("invalid_json", format!("Invalid JSON: {}", err), 400)).into()
}

fn handle_query_payload_error(err: error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    info!("Query error on {}: {}", req.path(), err);
    JsonError(ErrorResponse::new("invalid_query", format!("Invalid query: {}", err), 400)).into()
}

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

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting Sugar Match visibility service...");

    let visibility = &settings.visibility;
    if visibility.policies_diverge() {
        warn!(
            "Missing-field policies differ between call sites (profile: {:?}, explore: {:?}, contact: {:?})",
            visibility.profile_missing_fields,
            visibility.explore_missing_fields,
            visibility.contact_missing_fields
        );
    }
    if visibility.enforce_user_type_pairing {
        info!("User type pairing enforced");
    }

    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);

    let cache = match CacheManager::new(&settings.cache.redis_url, l1_cache_size, cache_ttl).await {
        Ok(c) => {
            info!("Cache manager initialized (L1: {} entries, TTL: {}s)", l1_cache_size, cache_ttl);
            Arc::new(c)
        }
        Err(e) => {
            error!("Failed to connect to Redis: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, "Redis connection required"));
        }
    };

    let db_max_conn = settings.database.max_connections.unwrap_or(10);

    let postgres = match PostgresClient::from_settings(
        &settings.database.url,
        Some(db_max_conn),
        settings.database.min_connections,
        settings.database.acquire_timeout_secs,
        settings.database.idle_timeout_secs,
    )
    .await
    {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to connect to PostgreSQL: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e));
        }
    };

    info!("PostgreSQL client initialized (max: {} connections)", db_max_conn);

    let profile_rules = visibility.profile_rules();
    let app_state = AppState {
        profiles: Arc::new(ProfileRepository::new(postgres, cache)),
        profile_rules,
        contact_rules: visibility.contact_rules(),
        explorer: Explorer::new(visibility.explore_rules()),
        explore: settings.explore.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::Data::new(profile_rules))
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
