use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{resolve_contact, resolve_profile_access, ProfileAccess};
use crate::models::{AccessDeniedResponse, ContactResponse, ProfileResponse, ViewerQuery};
use crate::routes::{bad_request, internal_error, not_found, AppState};
use crate::services::ProfileStore;

/// Where the profile page sends viewers who may not see a profile
pub const ACCESS_DENIED_REDIRECT: &str = "/access-denied";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/profiles/{id}", web::get().to(get_profile))
        .route("/profiles/{id}/contact", web::get().to(get_contact))
        .route("/profiles/{id}/refresh", web::post().to(refresh_profile));
}

/// GET /api/v1/profiles/{id}?viewerId={viewerId}
async fn get_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ViewerQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return bad_request("validation_failed", errors.to_string());
    }

    let target_id = path.into_inner();
    let viewer_id = &query.viewer_id;

    let viewer = match state.profiles.get_profile(viewer_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => return not_found(format!("viewer {} not found", viewer_id)),
        Err(e) => {
            tracing::error!("Failed to fetch viewer {}: {}", viewer_id, e);
            return internal_error("profile_lookup_failed", e.to_string());
        }
    };

    // Own profile needs no second lookup
    let target = if target_id == viewer.id {
        Some(viewer.clone())
    } else {
        match state.profiles.get_profile(&target_id).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::error!("Failed to fetch profile {}: {}", target_id, e);
                return internal_error("profile_lookup_failed", e.to_string());
            }
        }
    };

    let access = resolve_profile_access(&state.profile_rules, &viewer.visibility(), target.as_ref());

    tracing::info!("Profile {} requested by {}: {:?}", target_id, viewer_id, access);

    match (access, target) {
        (ProfileAccess::Owner, Some(profile)) => HttpResponse::Ok().json(ProfileResponse {
            profile,
            is_owner: true,
        }),
        (ProfileAccess::Granted, Some(profile)) => HttpResponse::Ok().json(ProfileResponse {
            profile,
            is_owner: false,
        }),
        (ProfileAccess::Denied, _) => HttpResponse::Forbidden().json(AccessDeniedResponse {
            error: "access_denied".to_string(),
            message: "You are not allowed to view this profile".to_string(),
            redirect: ACCESS_DENIED_REDIRECT.to_string(),
            status_code: 403,
        }),
        _ => not_found(format!("profile {} not found", target_id)),
    }
}

/// GET /api/v1/profiles/{id}/contact?viewerId={viewerId}
///
/// Whether the viewer may open a conversation with the profile owner.
async fn get_contact(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ViewerQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return bad_request("validation_failed", errors.to_string());
    }

    let recipient_id = path.into_inner();

    let (sender, recipient) = match tokio::try_join!(
        state.profiles.get_profile(&query.viewer_id),
        state.profiles.get_profile(&recipient_id),
    ) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("Failed to fetch profiles for contact check: {}", e);
            return internal_error("profile_lookup_failed", e.to_string());
        }
    };

    if sender.is_none() || recipient.is_none() {
        return not_found("sender or recipient not found");
    }

    let decision = resolve_contact(&state.contact_rules, sender.as_ref(), recipient.as_ref());

    tracing::debug!("Contact {} -> {}: {:?}", query.viewer_id, recipient_id, decision);

    HttpResponse::Ok().json(ContactResponse {
        can_message: decision.is_allowed(),
        reason: decision.reason().to_string(),
    })
}

/// POST /api/v1/profiles/{id}/refresh
///
/// Called after a profile edit so the next read sees the new values.
async fn refresh_profile(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let success = state.profiles.invalidate(&id).await;

    tracing::info!("Refreshed cached profile {}: {}", id, success);

    HttpResponse::Ok().json(serde_json::json!({
        "id": id,
        "success": success,
    }))
}
