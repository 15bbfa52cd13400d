//! Sugar Match - profile visibility service for the Sugar relationship platform
//!
//! Decides who may see and message whom from each user's declared gender,
//! preference and (optionally) relationship role, and serves the profile and
//! explore pages through that rule.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Explorer, VisibilityPredicate, VisibilityRules, resolve_profile_access, resolve_contact};
pub use models::{UserType, Gender, LookingFor, MissingFieldPolicy, VisibilityProfile, UserProfile};
