use crate::models::{CandidateQuery, ExploreFilter, UserProfile};

/// Check if a profile satisfies the explore page's search filters
///
/// Visibility is checked separately; this only covers what the viewer typed
/// into the search form.
#[inline]
pub fn matches_search_filter(profile: &UserProfile, filter: &ExploreFilter) -> bool {
    if let Some(user_type) = filter.user_type {
        if profile.user_type != user_type {
            return false;
        }
    }

    if !age_within(profile.age, filter.min_age, filter.max_age) {
        return false;
    }

    match normalized_location(filter.location.as_deref()) {
        Some(needle) => location_contains(profile.location.as_deref(), &needle),
        None => true,
    }
}

/// Check if a stored profile satisfies a pushed-down explore query
///
/// Mirrors the `WHERE` clause the PostgreSQL store runs.
#[inline]
pub fn matches_candidate_query(profile: &UserProfile, query: &CandidateQuery) -> bool {
    if !profile.is_active || profile.id == query.exclude_id {
        return false;
    }

    if !query.genders.contains(&profile.gender) {
        return false;
    }

    if let Some(types) = &query.user_types {
        if !types.contains(&profile.user_type) {
            return false;
        }
    }

    if !age_within(profile.age, query.min_age, query.max_age) {
        return false;
    }

    match &query.location {
        Some(needle) => location_contains(profile.location.as_deref(), needle),
        None => true,
    }
}

/// A profile without an age can't satisfy an age bound
#[inline]
fn age_within(age: Option<u8>, min_age: Option<u8>, max_age: Option<u8>) -> bool {
    if min_age.is_none() && max_age.is_none() {
        return true;
    }
    let Some(age) = age else {
        return false;
    };
    !(min_age.is_some_and(|min| age < min) || max_age.is_some_and(|max| age > max))
}

/// Trimmed, lowercased search text; blank means no filter
pub fn normalized_location(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim).filter(|s| !s.is_empty()).map(str::to_lowercase)
}

#[inline]
fn location_contains(location: Option<&str>, needle: &str) -> bool {
    location.is_some_and(|location| location.to_lowercase().contains(needle))
}
