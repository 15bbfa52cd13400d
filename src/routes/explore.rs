use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::next_offset;
use crate::models::{ExploreFilter, ExploreQuery, ExploreResponse, UserType};
use crate::routes::{bad_request, internal_error, not_found, AppState};
use crate::services::ProfileStore;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/explore", web::get().to(explore));
}

/// GET /api/v1/explore?viewerId=&userType=&minAge=&maxAge=&location=&limit=&offset=
///
/// Lists profiles the viewer is interested in. Only the viewer's own
/// preference is applied here; mutual visibility is enforced when a profile
/// is opened.
async fn explore(state: web::Data<AppState>, query: web::Query<ExploreQuery>) -> impl Responder {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for explore request: {:?}", errors);
        return bad_request("validation_failed", errors.to_string());
    }
    if !query.age_range_is_valid() {
        return bad_request("validation_failed", "minAge must not exceed maxAge");
    }

    let user_type = match query.user_type.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => match UserType::parse(raw) {
            UserType::Unspecified => {
                return bad_request(
                    "invalid_user_type",
                    "userType must be one of: sugar_baby, sugar_daddy, sugar_mommy, sugar_babyboy",
                );
            }
            parsed => Some(parsed),
        },
        None => None,
    };

    // Inactive viewers are treated like missing ones
    let viewer = match state.profiles.get_profile(&query.viewer_id).await {
        Ok(Some(profile)) if profile.is_active => profile,
        Ok(_) => return not_found(format!("viewer {} not found", query.viewer_id)),
        Err(e) => {
            tracing::error!("Failed to fetch viewer {}: {}", query.viewer_id, e);
            return internal_error("profile_lookup_failed", e.to_string());
        }
    };

    let filter = ExploreFilter {
        user_type,
        min_age: query.min_age,
        max_age: query.max_age,
        location: query.location.clone(),
        offset: query.offset.unwrap_or(0),
        limit: query
            .limit
            .unwrap_or(state.explore.default_limit)
            .min(state.explore.max_limit),
    };

    let candidate_query = state.explorer.candidate_query(&viewer.visibility(), &filter);

    let page = match state.profiles.explore_page(&candidate_query).await {
        Ok(page) => page,
        Err(e) => {
            tracing::error!("Failed to load explore page for {}: {}", viewer.id, e);
            return internal_error("candidate_lookup_failed", e.to_string());
        }
    };

    tracing::info!(
        "Explore for {}: returning {} of {} visible (offset {})",
        viewer.id,
        page.profiles.len(),
        page.total,
        filter.offset
    );

    let next_offset = next_offset(filter.offset, page.profiles.len(), page.total);

    HttpResponse::Ok().json(ExploreResponse {
        profiles: page.profiles,
        total: page.total,
        next_offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use chrono::{Duration, TimeZone, Utc};
    use crate::models::{Gender, LookingFor, UserProfile};
    use crate::routes::test_support::{profile, state};

    async fn get(profiles: Vec<UserProfile>, uri: &str) -> (StatusCode, serde_json::Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(profiles)))
                .service(web::scope("/api/v1").configure(configure)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = resp.status();
        let body: serde_json::Value = test::read_body_json(resp).await;
        (status, body)
    }

    fn dated(id: usize, gender: Gender, minutes_old: i64) -> UserProfile {
        let mut p = profile(&format!("user-{:04}", id), gender, LookingFor::Male);
        p.created_at = Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap() - Duration::minutes(minutes_old));
        p
    }

    #[actix_web::test]
    async fn test_total_counts_visible_profiles_behind_newer_ones() {
        let mut profiles: Vec<UserProfile> = (0..600)
            .map(|i| dated(i, if i < 500 { Gender::Male } else { Gender::Female }, i as i64))
            .collect();
        profiles.push(profile("viewer", Gender::Male, LookingFor::Female));

        let (status, body) = get(profiles, "/api/v1/explore?viewerId=viewer&limit=20").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 100);
        assert_eq!(body["nextOffset"], 20);
        assert_eq!(body["profiles"].as_array().unwrap().len(), 20);
        assert_eq!(body["profiles"][0]["id"], "user-0500");
    }

    #[actix_web::test]
    async fn test_last_page_has_no_next_offset() {
        let mut profiles: Vec<UserProfile> = (0..5).map(|i| dated(i, Gender::Female, i as i64)).collect();
        profiles.push(profile("viewer", Gender::Male, LookingFor::Female));

        let (_, body) = get(profiles, "/api/v1/explore?viewerId=viewer&limit=2&offset=4").await;

        assert_eq!(body["total"], 5);
        assert_eq!(body["profiles"][0]["id"], "user-0004");
        assert!(body["nextOffset"].is_null());
    }

    #[actix_web::test]
    async fn test_inactive_viewer_is_not_found() {
        let mut viewer = profile("viewer", Gender::Male, LookingFor::Female);
        viewer.is_active = false;
        let profiles = vec![viewer, dated(1, Gender::Female, 1)];

        let (status, body) = get(profiles, "/api/v1/explore?viewerId=viewer").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[actix_web::test]
    async fn test_unknown_viewer_and_bad_input() {
        let (status, _) = get(vec![], "/api/v1/explore?viewerId=ghost").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let viewer = vec![profile("viewer", Gender::Male, LookingFor::Female)];
        let (status, body) = get(viewer.clone(), "/api/v1/explore?viewerId=viewer&userType=astronaut").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_user_type");

        let (status, _) = get(viewer, "/api/v1/explore?viewerId=viewer&minAge=40&maxAge=30").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
