use serde::{Deserialize, Serialize};
use crate::models::domain::UserProfile;

/// Result of an ad-hoc visibility check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityCheckResponse {
    #[serde(rename = "viewerCanSeeTarget")]
    pub viewer_can_see_target: bool,
    #[serde(rename = "targetCanSeeViewer")]
    pub target_can_see_viewer: bool,
    pub mutual: bool,
}

/// Profile page payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: UserProfile,
    #[serde(rename = "isOwner")]
    pub is_owner: bool,
}

/// Returned instead of a profile when the viewer may not see it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessDeniedResponse {
    pub error: String,
    pub message: String,
    pub redirect: String,
    pub status_code: u16,
}

/// Messaging permission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    #[serde(rename = "canMessage")]
    pub can_message: bool,
    pub reason: String,
}

/// Explore page payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExploreResponse {
    pub profiles: Vec<UserProfile>,
    pub total: usize,
    #[serde(rename = "nextOffset")]
    pub next_offset: Option<usize>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: &str, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status_code,
        }
    }
}
