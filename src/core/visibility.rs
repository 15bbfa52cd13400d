use crate::models::{LookingFor, MissingFieldPolicy, VisibilityProfile};

/// Anything that can decide whether one user may see another
///
/// Callers resolve "not found" and self-views before reaching this seam.
pub trait VisibilityPredicate {
    /// One-directional check: the viewer's preference evaluated against the target
    fn can_user_see(&self, viewer: &VisibilityProfile, target: &VisibilityProfile) -> bool;

    /// Both legs must pass
    fn can_users_see_each_other(&self, a: &VisibilityProfile, b: &VisibilityProfile) -> bool {
        self.can_user_see(a, b) && self.can_user_see(b, a)
    }
}

/// Gender leg of the rule, evaluated from `evaluator`'s side.
///
/// "Both" accepts anyone; otherwise the preference has to name the other
/// user's gender.
#[inline]
pub fn gender_leg(evaluator: &VisibilityProfile, other: &VisibilityProfile) -> bool {
    match evaluator.looking_for {
        LookingFor::Both => true,
        preference => preference.names(other.gender),
    }
}

/// Visibility rule set for one call site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityRules {
    pub missing_fields: MissingFieldPolicy,
    pub enforce_user_type_pairing: bool,
}

impl VisibilityRules {
    pub fn new(missing_fields: MissingFieldPolicy, enforce_user_type_pairing: bool) -> Self {
        Self {
            missing_fields,
            enforce_user_type_pairing,
        }
    }

    /// Rules that evaluate records exactly as given
    pub fn unfilled() -> Self {
        Self::new(MissingFieldPolicy::Unfilled, false)
    }

    pub fn legacy() -> Self {
        Self::new(MissingFieldPolicy::LegacyDefaults, false)
    }
}

impl Default for VisibilityRules {
    fn default() -> Self {
        Self::unfilled()
    }
}

impl VisibilityPredicate for VisibilityRules {
    fn can_user_see(&self, viewer: &VisibilityProfile, target: &VisibilityProfile) -> bool {
        let viewer = viewer.resolved(self.missing_fields);
        let target = target.resolved(self.missing_fields);

        if self.enforce_user_type_pairing && !viewer.user_type.pairs_with(&target.user_type) {
            return false;
        }

        gender_leg(&viewer, &target)
    }
}
