use crate::core::visibility::VisibilityPredicate;
use crate::models::{UserProfile, VisibilityProfile};

/// Outcome of opening someone's profile page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileAccess {
    NotFound,
    Owner,
    Granted,
    Denied,
}

/// Outcome of trying to open a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactDecision {
    SelfContact,
    NotFound,
    Allowed,
    Denied,
}

impl ContactDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, ContactDecision::Allowed)
    }

    pub fn reason(&self) -> &'static str {
        match self {
            ContactDecision::SelfContact => "self",
            ContactDecision::NotFound => "not_found",
            ContactDecision::Allowed => "mutual_match",
            ContactDecision::Denied => "not_mutually_visible",
        }
    }
}

/// Decide what a viewer gets when opening `target`'s profile.
///
/// Missing and inactive profiles are "not found" rather than denied, and the
/// owner never goes through the predicate.
pub fn resolve_profile_access<P: VisibilityPredicate + ?Sized>(
    predicate: &P,
    viewer: &VisibilityProfile,
    target: Option<&UserProfile>,
) -> ProfileAccess {
    let Some(target) = target else {
        return ProfileAccess::NotFound;
    };

    if target.id == viewer.id {
        return ProfileAccess::Owner;
    }

    if !target.is_active {
        return ProfileAccess::NotFound;
    }

    if predicate.can_users_see_each_other(viewer, &target.visibility()) {
        ProfileAccess::Granted
    } else {
        ProfileAccess::Denied
    }
}

/// Messaging requires mutual visibility between two live profiles
pub fn resolve_contact<P: VisibilityPredicate + ?Sized>(
    predicate: &P,
    sender: Option<&UserProfile>,
    recipient: Option<&UserProfile>,
) -> ContactDecision {
    let (Some(sender), Some(recipient)) = (sender, recipient) else {
        return ContactDecision::NotFound;
    };

    if sender.id == recipient.id {
        return ContactDecision::SelfContact;
    }

    if !sender.is_active || !recipient.is_active {
        return ContactDecision::NotFound;
    }

    if predicate.can_users_see_each_other(&sender.visibility(), &recipient.visibility()) {
        ContactDecision::Allowed
    } else {
        ContactDecision::Denied
    }
}
