//! Unit tests for match specifications and route conditions

use regex::Regex;
use relay_application::routing::match_pattern;
use relay_application::{MatchSpec, RouteCondition, parse_identifier};

#[test]
fn test_exact_match_is_case_insensitive() {
    assert!(match_pattern(&MatchSpec::exact("GPT-4o"), "gpt-4O"));
    assert!(!match_pattern(&MatchSpec::exact("gpt-4o"), "gpt-4o-mini"));
}

#[test]
fn test_regex_tests_lowercased_value() {
    let spec = MatchSpec::from(Regex::new("^gpt-4").unwrap());

    assert!(match_pattern(&spec, "GPT-4-Turbo"));
    assert!(!match_pattern(&spec, "o3"));
}

#[test]
fn test_list_is_logical_or() {
    let spec = MatchSpec::from(vec!["a", "b"]);

    assert!(match_pattern(&spec, "B"));
    assert!(!match_pattern(&spec, "c"));
}

#[test]
fn test_empty_list_never_matches() {
    let spec = MatchSpec::Any(Vec::new());

    assert!(!match_pattern(&spec, ""));
    assert!(!match_pattern(&spec, "anything"));
}

#[test]
fn test_predicate_receives_lowercased_value() {
    let spec = MatchSpec::predicate(|value| value == "mixed-case");

    assert!(match_pattern(&spec, "MiXeD-CaSe"));
}

#[test]
fn test_route_conditions_inspect_each_dimension() {
    let target = parse_identifier("Acme/Rocket-1").unwrap();

    assert!(RouteCondition::model_id("acme/rocket-1").matches(&target));
    assert!(RouteCondition::model("ROCKET-1").matches(&target));
    assert!(RouteCondition::provider("acme").matches(&target));
    assert!(!RouteCondition::provider("rocket-1").matches(&target));
}
