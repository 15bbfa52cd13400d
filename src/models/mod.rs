// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{UserType, Gender, LookingFor, MissingFieldPolicy, VisibilityProfile, UserProfile, ExploreFilter, CandidateQuery};
pub use requests::{VisibilityCheckRequest, ViewerQuery, ExploreQuery};
pub use responses::{VisibilityCheckResponse, ProfileResponse, AccessDeniedResponse, ContactResponse, ExploreResponse, HealthResponse, ErrorResponse};
