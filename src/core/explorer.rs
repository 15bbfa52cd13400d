use std::cmp::Ordering;

use crate::core::{
    filters::{matches_search_filter, normalized_location},
    visibility::{VisibilityPredicate, VisibilityRules},
};
use crate::models::{CandidateQuery, ExploreFilter, Gender, LookingFor, UserProfile, UserType, VisibilityProfile};

/// Result of an explore pass
#[derive(Debug)]
pub struct ExploreResult {
    pub profiles: Vec<UserProfile>,
    /// Visible profiles before pagination
    pub total_visible: usize,
    pub next_offset: Option<usize>,
}

/// Explore/search orchestrator
///
/// # Pipeline Stages
/// 1. Drop the viewer's own profile and inactive profiles
/// 2. One-directional visibility (viewer -> candidate)
/// 3. Search filters
/// 4. Newest-first ordering and pagination
#[derive(Debug, Clone)]
pub struct Explorer {
    rules: VisibilityRules,
}

impl Explorer {
    pub fn new(rules: VisibilityRules) -> Self {
        Self { rules }
    }

    /// Filter `candidates` down to the page the viewer should see
    pub fn explore(
        &self,
        viewer: &VisibilityProfile,
        candidates: Vec<UserProfile>,
        filter: &ExploreFilter,
    ) -> ExploreResult {
        let mut visible: Vec<UserProfile> = candidates
            .into_iter()
            // Stage 1: self and inactive never show up
            .filter(|profile| profile.id != viewer.id && profile.is_active)
            // Stage 2: viewer's own preference only
            .filter(|profile| self.rules.can_user_see(viewer, &profile.visibility()))
            // Stage 3: search form
            .filter(|profile| matches_search_filter(profile, filter))
            .collect();

        sort_newest_first(&mut visible);

        let total_visible = visible.len();
        let profiles: Vec<UserProfile> = visible
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect();

        let next_offset = next_offset(filter.offset, profiles.len(), total_visible);

        ExploreResult {
            profiles,
            total_visible,
            next_offset,
        }
    }

    /// Express the viewer's side of the rule plus the search form as a store query
    ///
    /// Selects exactly the candidates `explore` would keep, so the store can
    /// count and paginate without loading every profile.
    pub fn candidate_query(&self, viewer: &VisibilityProfile, filter: &ExploreFilter) -> CandidateQuery {
        // Each stored gender goes through the real rule with an unset user
        // type, which never blocks pairing; pairing is narrowed separately.
        let genders = Gender::ALL
            .into_iter()
            .filter(|&gender| {
                let candidate = VisibilityProfile::new("candidate", gender, LookingFor::Unspecified);
                self.rules.can_user_see(viewer, &candidate)
            })
            .collect();

        let wanted = |user_type: &UserType| filter.user_type.map_or(true, |wanted| wanted == *user_type);
        let user_types = if self.rules.enforce_user_type_pairing && viewer.user_type != UserType::Unspecified {
            Some(
                UserType::ALL
                    .into_iter()
                    .filter(|t| viewer.user_type.pairs_with(t) && wanted(t))
                    .collect(),
            )
        } else {
            filter.user_type.map(|t| vec![t])
        };

        CandidateQuery {
            exclude_id: viewer.id.clone(),
            genders,
            user_types,
            min_age: filter.min_age,
            max_age: filter.max_age,
            location: normalized_location(filter.location.as_deref()),
            offset: filter.offset,
            limit: filter.limit,
        }
    }
}

/// Newest first, undated profiles last, id as tiebreak
pub fn sort_newest_first(profiles: &mut [UserProfile]) {
    profiles.sort_by(|a, b| {
        let by_date = match (a.created_at, b.created_at) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_date.then_with(|| a.id.cmp(&b.id))
    });
}

/// Offset of the following page, if any
pub fn next_offset(offset: usize, returned: usize, total: usize) -> Option<usize> {
    let consumed = offset + returned;
    (consumed < total).then_some(consumed)
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new(VisibilityRules::legacy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use crate::core::filters::matches_candidate_query;
    use crate::models::MissingFieldPolicy;

    fn create_candidate(id: &str, gender: Gender, looking_for: LookingFor, days_old: Option<i64>) -> UserProfile {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
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
            created_at: days_old.map(|d| base - Duration::days(d)),
        }
    }

    fn viewer() -> VisibilityProfile {
        VisibilityProfile::new("viewer", Gender::Male, LookingFor::Female)
    }

    fn page(limit: usize, offset: usize) -> ExploreFilter {
        ExploreFilter { limit, offset, ..Default::default() }
    }

    #[test]
    fn test_filters_by_viewer_preference_only() {
        let explorer = Explorer::new(VisibilityRules::unfilled());
        let candidates = vec![
            // Not interested in men, but explore is one-directional
            create_candidate("1", Gender::Female, LookingFor::Female, Some(1)),
            create_candidate("2", Gender::Male, LookingFor::Female, Some(1)),
            create_candidate("viewer", Gender::Male, LookingFor::Female, Some(1)),
        ];

        let result = explorer.explore(&viewer(), candidates, &page(10, 0));

        assert_eq!(result.total_visible, 1);
        assert_eq!(result.profiles[0].id, "1");
    }

    #[test]
    fn test_inactive_profiles_hidden() {
        let explorer = Explorer::new(VisibilityRules::unfilled());
        let mut hidden = create_candidate("1", Gender::Female, LookingFor::Male, Some(1));
        hidden.is_active = false;

        let result = explorer.explore(&viewer(), vec![hidden], &page(10, 0));
        assert!(result.profiles.is_empty());
    }

    #[test]
    fn test_legacy_defaults_treat_blank_candidate_as_female() {
        let candidate = create_candidate("1", Gender::Unspecified, LookingFor::Unspecified, Some(1));

        let legacy = Explorer::default().explore(&viewer(), vec![candidate.clone()], &page(10, 0));
        assert_eq!(legacy.total_visible, 1);

        let unfilled = Explorer::new(VisibilityRules::unfilled()).explore(&viewer(), vec![candidate], &page(10, 0));
        assert_eq!(unfilled.total_visible, 0);
    }

    #[test]
    fn test_newest_first_with_undated_last() {
        let explorer = Explorer::new(VisibilityRules::unfilled());
        let candidates = vec![
            create_candidate("old", Gender::Female, LookingFor::Male, Some(30)),
            create_candidate("undated", Gender::Female, LookingFor::Male, None),
            create_candidate("new", Gender::Female, LookingFor::Male, Some(1)),
        ];

        let result = explorer.explore(&viewer(), candidates, &page(10, 0));
        let ids: Vec<&str> = result.profiles.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old", "undated"]);
    }

    #[test]
    fn test_pagination() {
        let explorer = Explorer::new(VisibilityRules::unfilled());
        let candidates: Vec<UserProfile> = (0..5)
            .map(|i| create_candidate(&i.to_string(), Gender::Female, LookingFor::Male, Some(i)))
            .collect();

        let first = explorer.explore(&viewer(), candidates.clone(), &page(2, 0));
        assert_eq!(first.profiles.len(), 2);
        assert_eq!(first.total_visible, 5);
        assert_eq!(first.next_offset, Some(2));

        let last = explorer.explore(&viewer(), candidates, &page(2, 4));
        assert_eq!(last.profiles.len(), 1);
        assert_eq!(last.profiles[0].id, "4");
        assert_eq!(last.next_offset, None);
    }

    #[test]
    fn test_candidate_query_genders_follow_policy() {
        let filter = page(10, 0);
        let looking_for_women = viewer();

        let unfilled = Explorer::new(VisibilityRules::unfilled()).candidate_query(&looking_for_women, &filter);
        assert_eq!(unfilled.genders, vec![Gender::Female]);
        assert_eq!(unfilled.user_types, None);
        assert_eq!(unfilled.exclude_id, "viewer");

        // Unset gender reads as female under the legacy defaults
        let legacy = Explorer::default().candidate_query(&looking_for_women, &filter);
        assert_eq!(legacy.genders, vec![Gender::Female, Gender::Unspecified]);

        let blank = VisibilityProfile::new("viewer", Gender::Unspecified, LookingFor::Unspecified);
        let unfilled = Explorer::new(VisibilityRules::unfilled()).candidate_query(&blank, &filter);
        assert_eq!(unfilled.genders, vec![Gender::Unspecified]);
        let legacy = Explorer::default().candidate_query(&blank, &filter);
        assert_eq!(legacy.genders, vec![Gender::Male]);

        let open = VisibilityProfile::new("viewer", Gender::Male, LookingFor::Both);
        let query = Explorer::default().candidate_query(&open, &filter);
        assert_eq!(query.genders, Gender::ALL.to_vec());
    }

    #[test]
    fn test_candidate_query_user_types() {
        let daddy = viewer().with_user_type(UserType::SugarDaddy);
        let paired = Explorer::new(VisibilityRules::new(MissingFieldPolicy::Unfilled, true));

        let query = paired.candidate_query(&daddy, &page(10, 0));
        assert_eq!(
            query.user_types,
            Some(vec![UserType::SugarBaby, UserType::SugarBabyboy, UserType::Unspecified])
        );

        let filter = ExploreFilter { user_type: Some(UserType::SugarMommy), ..page(10, 0) };
        assert_eq!(paired.candidate_query(&daddy, &filter).user_types, Some(vec![]));

        let unpaired = Explorer::new(VisibilityRules::unfilled());
        assert_eq!(
            unpaired.candidate_query(&daddy, &filter).user_types,
            Some(vec![UserType::SugarMommy])
        );
    }

    #[test]
    fn test_candidate_query_selects_what_explore_keeps() {
        let types = UserType::ALL;
        let preferences = [LookingFor::Male, LookingFor::Female, LookingFor::Both, LookingFor::Unspecified];

        let mut candidates = Vec::new();
        for (i, gender) in Gender::ALL.into_iter().enumerate() {
            for (j, user_type) in types.into_iter().enumerate() {
                let mut candidate = create_candidate(&format!("{}-{}", i, j), gender, LookingFor::Both, Some(j as i64));
                candidate.user_type = user_type;
                candidates.push(candidate);
            }
        }

        for policy in [MissingFieldPolicy::LegacyDefaults, MissingFieldPolicy::Unfilled] {
            for pairing in [false, true] {
                let explorer = Explorer::new(VisibilityRules::new(policy, pairing));
                for gender in Gender::ALL {
                    for looking_for in preferences {
                        for user_type in types {
                            let viewer = VisibilityProfile::new("viewer", gender, looking_for).with_user_type(user_type);
                            let filter = page(100, 0);

                            let expected: Vec<String> = explorer
                                .explore(&viewer, candidates.clone(), &filter)
                                .profiles
                                .into_iter()
                                .map(|p| p.id)
                                .collect();

                            let query = explorer.candidate_query(&viewer, &filter);
                            let mut selected: Vec<UserProfile> = candidates
                                .iter()
                                .filter(|p| matches_candidate_query(p, &query))
                                .cloned()
                                .collect();
                            sort_newest_first(&mut selected);
                            let selected: Vec<String> = selected.into_iter().map(|p| p.id).collect();

                            assert_eq!(selected, expected, "{:?} {:?}", explorer, viewer);
                        }
                    }
                }
            }
        }
    }
}
