//! Property-based tests for override resolution
//!
//! Executable names are drawn from `[a-z]{1,8}` and rules use the
//! `*\<name>.exe` shape, so a rule matches exactly when its name equals the
//! process name.

use applang_foundation::{resolve, LanguageId, Rule, RuleSet};
use proptest::prelude::*;

fn process_path(name: &str) -> String {
    format!("C:\\Program Files\\Vendor\\{name}.exe")
}

fn rule_for(name: &str, id: i16) -> Rule {
    Rule::new(format!("*\\{name}.exe"), id)
}

fn language_id() -> impl Strategy<Value = i16> {
    prop_oneof![Just(-1i16), 0i16..=i16::MAX]
}

/// Rules that never match `target`
fn non_matching_rules(target: String) -> impl Strategy<Value = Vec<Rule>> {
    prop::collection::vec(("[a-z]{1,8}", language_id()), 0..8).prop_map(move |entries| {
        entries
            .into_iter()
            .filter(|(name, _)| *name != target)
            .map(|(name, id)| rule_for(&name, id))
            .collect()
    })
}

fn target_and_rules() -> impl Strategy<Value = (String, Vec<Rule>)> {
    "[a-z]{1,8}".prop_flat_map(|target| (Just(target.clone()), non_matching_rules(target)))
}

proptest! {
    /// Property: nothing matches => system default
    #[test]
    fn prop_no_match_yields_sentinel((target, rules) in target_and_rules()) {
        let resolution = resolve(&RuleSet::new(rules), &process_path(&target));
        prop_assert_eq!(resolution.matched.as_ref(), None);
        prop_assert_eq!(resolution.effective(), LanguageId::SYSTEM_DEFAULT);
    }

    /// Property: the first matching rule decides, later matches are ignored
    #[test]
    fn prop_first_match_wins(
        (target, mut rules) in target_and_rules(),
        winner in language_id(),
        loser in language_id(),
        position in any::<prop::sample::Index>(),
    ) {
        let index = position.index(rules.len() + 1);
        rules.insert(index, rule_for(&target, winner));
        rules.push(rule_for(&target, loser));

        let resolution = resolve(&RuleSet::new(rules), &process_path(&target));
        prop_assert_eq!(resolution.matched.as_ref().map(|m| m.index), Some(index));
        prop_assert_eq!(resolution.effective(), LanguageId::new(winner));
    }

    /// Property: rules after an empty pattern are never consulted
    #[test]
    fn prop_empty_pattern_terminates(
        (target, mut rules) in target_and_rules(),
        id in 0i16..=i16::MAX,
    ) {
        rules.push(Rule::new("", 1041));
        rules.push(rule_for(&target, id));

        let resolution = resolve(&RuleSet::new(rules), &process_path(&target));
        prop_assert_eq!(resolution.effective(), LanguageId::SYSTEM_DEFAULT);
    }

    /// Property: resolving twice gives the same answer
    #[test]
    fn prop_resolution_is_idempotent((target, rules) in target_and_rules(), id in language_id()) {
        let mut rules = rules;
        rules.push(rule_for(&target, id));
        let set = RuleSet::new(rules);
        let path = process_path(&target);

        prop_assert_eq!(resolve(&set, &path), resolve(&set, &path));
    }

    /// Property: pattern case never matters
    #[test]
    fn prop_matching_ignores_case(name in "[a-z]{1,8}", id in 0i16..=i16::MAX) {
        let set = RuleSet::new(vec![Rule::new(format!("*\\{}.EXE", name.to_uppercase()), id)]);
        let resolution = resolve(&set, &process_path(&name));
        prop_assert_eq!(resolution.effective(), LanguageId::new(id));
    }

    /// Property: a `;`-union matches whatever any of its parts matches
    #[test]
    fn prop_union_matches_either_part(a in "[a-z]{1,8}", b in "[a-z]{1,8}", id in 0i16..=i16::MAX) {
        let set = RuleSet::new(vec![Rule::new(format!("*\\{a}.exe;*\\{b}.exe"), id)]);
        prop_assert_eq!(resolve(&set, &process_path(&a)).effective(), LanguageId::new(id));
        prop_assert_eq!(resolve(&set, &process_path(&b)).effective(), LanguageId::new(id));
    }

    /// Property: a pattern without wildcards matches exactly the path it names
    #[test]
    fn prop_literal_path_matches_itself(
        dirs in prop::collection::vec("[A-Za-z0-9 _.()\\[\\]{}-]{1,12}", 1..4),
        name in "[a-z]{1,8}",
        id in 0i16..=i16::MAX,
    ) {
        let path = format!("C:\\{}\\{name}.exe", dirs.join("\\"));
        let set = RuleSet::new(vec![Rule::new(path.clone(), id)]);
        prop_assert_eq!(resolve(&set, &path).effective(), LanguageId::new(id));
        prop_assert_eq!(resolve(&set, &path.to_uppercase()).effective(), LanguageId::new(id));
    }
}
