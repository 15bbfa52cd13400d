use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::VisibilityProfile;

/// Ad-hoc visibility check between two capability records
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VisibilityCheckRequest {
    #[validate(custom(function = "validate_record_id"))]
    pub viewer: VisibilityProfile,
    #[validate(custom(function = "validate_record_id"))]
    pub target: VisibilityProfile,
}

fn validate_record_id(record: &VisibilityProfile) -> Result<(), validator::ValidationError> {
    if record.id.trim().is_empty() {
        return Err(validator::ValidationError::new("empty_id"));
    }
    Ok(())
}

/// Query string carrying the current viewer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ViewerQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "viewer_id", rename = "viewerId")]
    pub viewer_id: String,
}

/// Explore / search query string
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExploreQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "viewer_id", rename = "viewerId")]
    pub viewer_id: String,
    #[serde(alias = "user_type", rename = "userType", default)]
    pub user_type: Option<String>,
    #[serde(alias = "min_age", rename = "minAge", default)]
    pub min_age: Option<u8>,
    #[serde(alias = "max_age", rename = "maxAge", default)]
    pub max_age: Option<u8>,
    #[serde(default)]
    pub location: Option<String>,
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

impl ExploreQuery {
    /// Age bounds are optional but must not be inverted
    pub fn age_range_is_valid(&self) -> bool {
        match (self.min_age, self.max_age) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }
}
