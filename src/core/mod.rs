// Core algorithm exports
pub mod access;
pub mod explorer;
pub mod filters;
pub mod visibility;

pub use access::{resolve_profile_access, resolve_contact, ProfileAccess, ContactDecision};
pub use explorer::{next_offset, sort_newest_first, Explorer, ExploreResult};
pub use filters::{matches_candidate_query, matches_search_filter, normalized_location};
pub use visibility::{gender_leg, VisibilityPredicate, VisibilityRules};
