use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{VisibilityPredicate, VisibilityRules};
use crate::models::{VisibilityCheckRequest, VisibilityCheckResponse};
use crate::routes::bad_request;

/// Routes that only need the rule set, no storage
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/visibility/check", web::post().to(check_visibility));
}

/// POST /api/v1/visibility/check
///
/// Request body:
/// ```json
/// {
///   "viewer": { "id": "a", "userType": "sugar_daddy", "gender": "male", "lookingFor": "female" },
///   "target": { "id": "b", "gender": "female", "lookingFor": "both" }
/// }
/// ```
async fn check_visibility(
    rules: web::Data<VisibilityRules>,
    req: web::Json<VisibilityCheckRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for visibility check: {:?}", errors);
        return bad_request("validation_failed", errors.to_string());
    }

    if req.viewer.id == req.target.id {
        return bad_request("self_pair", "viewer and target are the same user");
    }

    let viewer_can_see_target = rules.can_user_see(&req.viewer, &req.target);
    let target_can_see_viewer = rules.can_user_see(&req.target, &req.viewer);

    tracing::debug!(
        "Visibility {} <-> {}: {} / {}",
        req.viewer.id,
        req.target.id,
        viewer_can_see_target,
        target_can_see_viewer
    );

    HttpResponse::Ok().json(VisibilityCheckResponse {
        viewer_can_see_target,
        target_can_see_viewer,
        mutual: viewer_can_see_target && target_can_see_viewer,
    })
}
