use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowercase a raw tag and drop separators so "Sugar Baby", "sugar_baby"
/// and "sugarBaby" all compare equal.
fn normalize_tag(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Relationship role a user advertises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum UserType {
    SugarBaby,
    SugarDaddy,
    SugarMommy,
    SugarBabyboy,
    #[default]
    Unspecified,
}

impl UserType {
    pub const ALL: [UserType; 5] = [
        UserType::SugarBaby,
        UserType::SugarDaddy,
        UserType::SugarMommy,
        UserType::SugarBabyboy,
        UserType::Unspecified,
    ];

    pub fn parse(raw: &str) -> Self {
        match normalize_tag(raw).as_str() {
            "sugarbaby" | "baby" => UserType::SugarBaby,
            "sugardaddy" | "daddy" => UserType::SugarDaddy,
            "sugarmommy" | "mommy" => UserType::SugarMommy,
            "sugarbabyboy" | "babyboy" => UserType::SugarBabyboy,
            _ => UserType::Unspecified,
        }
    }

    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            UserType::SugarBaby => Some("sugar_baby"),
            UserType::SugarDaddy => Some("sugar_daddy"),
            UserType::SugarMommy => Some("sugar_mommy"),
            UserType::SugarBabyboy => Some("sugar_babyboy"),
            UserType::Unspecified => None,
        }
    }

    /// Daddies and mommies provide, babies and babyboys seek.
    pub fn is_benefactor(&self) -> bool {
        matches!(self, UserType::SugarDaddy | UserType::SugarMommy)
    }

    pub fn is_seeker(&self) -> bool {
        matches!(self, UserType::SugarBaby | UserType::SugarBabyboy)
    }

    /// Benefactor/seeker pairing. An unspecified role never blocks.
    pub fn pairs_with(&self, other: &UserType) -> bool {
        match (self, other) {
            (UserType::Unspecified, _) | (_, UserType::Unspecified) => true,
            (a, b) => (a.is_benefactor() && b.is_seeker()) || (a.is_seeker() && b.is_benefactor()),
        }
    }
}

impl From<Option<String>> for UserType {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(UserType::parse).unwrap_or_default()
    }
}

impl From<UserType> for Option<String> {
    fn from(value: UserType) -> Self {
        value.as_str().map(str::to_string)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Unspecified];

    pub fn parse(raw: &str) -> Self {
        match normalize_tag(raw).as_str() {
            "male" | "m" | "man" => Gender::Male,
            "female" | "f" | "woman" => Gender::Female,
            _ => Gender::Unspecified,
        }
    }

    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            Gender::Male => Some("male"),
            Gender::Female => Some("female"),
            Gender::Unspecified => None,
        }
    }
}

impl From<Option<String>> for Gender {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Gender::parse).unwrap_or_default()
    }
}

impl From<Gender> for Option<String> {
    fn from(value: Gender) -> Self {
        value.as_str().map(str::to_string)
    }
}

/// Declared gender preference for matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum LookingFor {
    Male,
    Female,
    Both,
    #[default]
    Unspecified,
}

impl LookingFor {
    pub fn parse(raw: &str) -> Self {
        match normalize_tag(raw).as_str() {
            "male" | "men" | "m" => LookingFor::Male,
            "female" | "women" | "f" => LookingFor::Female,
            "both" | "any" | "all" => LookingFor::Both,
            _ => LookingFor::Unspecified,
        }
    }

    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            LookingFor::Male => Some("male"),
            LookingFor::Female => Some("female"),
            LookingFor::Both => Some("both"),
            LookingFor::Unspecified => None,
        }
    }

    /// Whether this preference names the given gender.
    ///
    /// `Both` is handled by the predicate before this is consulted. An unset
    /// preference only lines up with an unset gender.
    pub fn names(&self, gender: Gender) -> bool {
        matches!(
            (self, gender),
            (LookingFor::Male, Gender::Male)
                | (LookingFor::Female, Gender::Female)
                | (LookingFor::Unspecified, Gender::Unspecified)
        )
    }
}

impl From<Option<String>> for LookingFor {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(LookingFor::parse).unwrap_or_default()
    }
}

impl From<LookingFor> for Option<String> {
    fn from(value: LookingFor) -> Self {
        value.as_str().map(str::to_string)
    }
}

macro_rules! display_tag {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str().unwrap_or("unspecified"))
            }
        })*
    };
}

display_tag!(UserType, Gender, LookingFor);

/// How unset gender / preference values are treated before evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFieldPolicy {
    /// Unset gender becomes female, unset preference becomes male.
    LegacyDefaults,
    /// Values are evaluated as unset.
    Unfilled,
}

/// The subset of a user that decides who may see whom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityProfile {
    pub id: String,
    #[serde(rename = "userType", default)]
    pub user_type: UserType,
    #[serde(default)]
    pub gender: Gender,
    #[serde(rename = "lookingFor", default)]
    pub looking_for: LookingFor,
}

impl VisibilityProfile {
    pub fn new(id: impl Into<String>, gender: Gender, looking_for: LookingFor) -> Self {
        Self {
            id: id.into(),
            user_type: UserType::Unspecified,
            gender,
            looking_for,
        }
    }

    pub fn with_user_type(mut self, user_type: UserType) -> Self {
        self.user_type = user_type;
        self
    }

    /// Substitute missing values according to the policy
    pub fn resolved(&self, policy: MissingFieldPolicy) -> Self {
        let mut resolved = self.clone();
        if policy == MissingFieldPolicy::LegacyDefaults {
            if resolved.gender == Gender::Unspecified {
                resolved.gender = Gender::Female;
            }
            if resolved.looking_for == LookingFor::Unspecified {
                resolved.looking_for = LookingFor::Male;
            }
        }
        resolved
    }
}

/// Stored user profile as served to the profile and explore pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "userType", default)]
    pub user_type: UserType,
    #[serde(default)]
    pub gender: Gender,
    #[serde(rename = "lookingFor", default)]
    pub looking_for: LookingFor,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(rename = "photoUrls", default)]
    pub photo_urls: Vec<String>,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_true() -> bool { true }

impl UserProfile {
    pub fn visibility(&self) -> VisibilityProfile {
        VisibilityProfile {
            id: self.id.clone(),
            user_type: self.user_type,
            gender: self.gender,
            looking_for: self.looking_for,
        }
    }
}

/// Search filters applied on the explore page
#[derive(Debug, Clone, Default)]
pub struct ExploreFilter {
    pub user_type: Option<UserType>,
    pub min_age: Option<u8>,
    pub max_age: Option<u8>,
    pub location: Option<String>,
    pub offset: usize,
    pub limit: usize,
}

/// Explore query pushed down to the profile store
///
/// `genders` and `user_types` list the stored values a candidate may carry;
/// `Unspecified` stands for an unset column. `user_types: None` means any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateQuery {
    pub exclude_id: String,
    pub genders: Vec<Gender>,
    pub user_types: Option<Vec<UserType>>,
    pub min_age: Option<u8>,
    pub max_age: Option<u8>,
    /// Lowercased, trimmed, never empty
    pub location: Option<String>,
    pub offset: usize,
    pub limit: usize,
}
