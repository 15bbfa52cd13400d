// Visibility rule properties checked through the public API

use sugar_match::core::{gender_leg, VisibilityPredicate, VisibilityRules};
use sugar_match::models::{Gender, LookingFor, MissingFieldPolicy, UserType, VisibilityProfile};

const GENDERS: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Unspecified];
const PREFERENCES: [LookingFor; 4] = [LookingFor::Male, LookingFor::Female, LookingFor::Both, LookingFor::Unspecified];

fn user(id: &str, gender: Gender, looking_for: LookingFor) -> VisibilityProfile {
    VisibilityProfile::new(id, gender, looking_for)
}

fn all_rules() -> Vec<VisibilityRules> {
    let mut rules = Vec::new();
    for policy in [MissingFieldPolicy::LegacyDefaults, MissingFieldPolicy::Unfilled] {
        for pairing in [false, true] {
            rules.push(VisibilityRules::new(policy, pairing));
        }
    }
    rules
}

#[test]
fn test_both_is_always_satisfied() {
    for gender in GENDERS {
        for other_gender in GENDERS {
            let evaluator = user("a", gender, LookingFor::Both);
            assert!(gender_leg(&evaluator, &user("b", other_gender, LookingFor::Male)));
        }
    }
}

#[test]
fn test_looking_for_male() {
    let a = user("a", Gender::Female, LookingFor::Male);
    assert!(gender_leg(&a, &user("b", Gender::Male, LookingFor::Both)));
    assert!(!gender_leg(&a, &user("c", Gender::Female, LookingFor::Both)));
}

#[test]
fn test_symmetry_scenario() {
    let a = user("a", Gender::Female, LookingFor::Male);
    let b = user("b", Gender::Male, LookingFor::Female);
    for rules in all_rules() {
        assert!(rules.can_users_see_each_other(&a, &b), "{:?}", rules);
    }
}

#[test]
fn test_asymmetry_scenario() {
    let a = user("a", Gender::Female, LookingFor::Male);
    let b = user("b", Gender::Female, LookingFor::Male);
    for rules in all_rules() {
        assert!(!rules.can_user_see(&a, &b));
        assert!(!rules.can_users_see_each_other(&a, &b));
    }
}

#[test]
fn test_mutual_is_order_independent_and_total() {
    let types = [UserType::SugarBaby, UserType::SugarDaddy, UserType::SugarMommy, UserType::SugarBabyboy, UserType::Unspecified];
    for rules in all_rules() {
        for ga in GENDERS {
            for la in PREFERENCES {
                for gb in GENDERS {
                    for lb in PREFERENCES {
                        for (ta, tb) in types.iter().zip(types.iter().rev()) {
                            let a = user("a", ga, la).with_user_type(*ta);
                            let b = user("b", gb, lb).with_user_type(*tb);
                            assert_eq!(
                                rules.can_users_see_each_other(&a, &b),
                                rules.can_users_see_each_other(&b, &a)
                            );
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_missing_fields_do_not_panic() {
    let blank: VisibilityProfile = serde_json::from_str(r#"{"id":"a","gender":null}"#).unwrap();
    let declared = user("b", Gender::Male, LookingFor::Female);

    // Legacy: blank reads as a female looking for males
    assert!(VisibilityRules::legacy().can_users_see_each_other(&blank, &declared));
    // Unfilled: blank matches nobody with a declared gender
    assert!(!VisibilityRules::unfilled().can_users_see_each_other(&blank, &declared));
}
