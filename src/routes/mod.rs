// Route exports
pub mod explore;
pub mod profiles;
pub mod visibility;

use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::core::{Explorer, VisibilityRules};
use crate::config::ExploreSettings;
use crate::models::{ErrorResponse, HealthResponse};
use crate::services::ProfileStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileStore>,
    pub profile_rules: VisibilityRules,
    pub contact_rules: VisibilityRules,
    pub explorer: Explorer,
    pub explore: ExploreSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(visibility::configure)
            .configure(profiles::configure)
            .configure(explore::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.profiles.health_check().await;

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

pub(crate) fn bad_request(error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error, message, 400))
}

pub(crate) fn not_found(message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("not_found", message, 404))
}

pub(crate) fn internal_error(error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(error, message, 500))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::models::{Gender, LookingFor, UserProfile, UserType};
    use crate::services::MemoryProfileStore;

    pub fn profile(id: &str, gender: Gender, looking_for: LookingFor) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            display_name: format!("User {}", id),
            user_type: UserType::SugarBaby,
            gender,
            looking_for,
            age: Some(25),
            location: Some("Miami".to_string()),
            bio: None,
            photo_urls: vec![],
            is_active: true,
            created_at: None,
        }
    }

    /// State over an in-memory store, all call sites on unfilled rules
    pub fn state(profiles: Vec<UserProfile>) -> AppState {
        AppState {
            profiles: Arc::new(MemoryProfileStore::new(profiles)),
            profile_rules: VisibilityRules::unfilled(),
            contact_rules: VisibilityRules::unfilled(),
            explorer: Explorer::new(VisibilityRules::unfilled()),
            explore: ExploreSettings::default(),
        }
    }
}
