//! Match specifications and route conditions

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use relay_domain::value_objects::ParsedIdentifier;

/// Predicate over a lowercased value
pub type MatchPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// How a route condition matches a normalized string
#[derive(Clone)]
pub enum MatchSpec {
    /// Case-insensitive equality
    Exact(String),
    /// Regular expression tested against the lowercased value
    Pattern(Regex),
    /// Any of the nested specs; empty never matches
    Any(Vec<MatchSpec>),
    /// Custom predicate over the lowercased value
    Predicate(MatchPredicate),
}

impl MatchSpec {
    /// Case-insensitive exact match
    pub fn exact<S: Into<String>>(value: S) -> Self {
        Self::Exact(value.into())
    }

    /// Predicate match
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    /// Whether the spec matches `value`
    pub fn matches(&self, value: &str) -> bool {
        match_pattern(self, value)
    }
}

impl From<&str> for MatchSpec {
    fn from(value: &str) -> Self {
        Self::Exact(value.to_owned())
    }
}

impl From<String> for MatchSpec {
    fn from(value: String) -> Self {
        Self::Exact(value)
    }
}

impl From<Regex> for MatchSpec {
    fn from(value: Regex) -> Self {
        Self::Pattern(value)
    }
}

impl<T: Into<MatchSpec>> From<Vec<T>> for MatchSpec {
    fn from(value: Vec<T>) -> Self {
        Self::Any(value.into_iter().map(Into::into).collect())
    }
}

impl fmt::Debug for MatchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(s) => f.debug_tuple("Exact").field(s).finish(),
            Self::Pattern(r) => f.debug_tuple("Pattern").field(&r.as_str()).finish(),
            Self::Any(specs) => f.debug_tuple("Any").field(specs).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Evaluate a match spec against a value, lowercasing it first
pub fn match_pattern(spec: &MatchSpec, value: &str) -> bool {
    matches_lowered(spec, &value.to_lowercase())
}

fn matches_lowered(spec: &MatchSpec, lowered: &str) -> bool {
    match spec {
        MatchSpec::Exact(expected) => expected.to_lowercase() == lowered,
        MatchSpec::Pattern(regex) => regex.is_match(lowered),
        MatchSpec::Any(specs) => specs.iter().any(|s| matches_lowered(s, lowered)),
        MatchSpec::Predicate(predicate) => predicate(lowered),
    }
}

/// Which part of the parsed identifier a route condition inspects
#[derive(Debug, Clone)]
pub enum RouteCondition {
    /// The normalized `provider/model` composite
    ModelId(MatchSpec),
    /// The normalized model suffix
    Model(MatchSpec),
    /// The normalized provider key
    Provider(MatchSpec),
}

impl RouteCondition {
    /// Match on the full identifier
    pub fn model_id<M: Into<MatchSpec>>(spec: M) -> Self {
        Self::ModelId(spec.into())
    }

    /// Match on the model suffix
    pub fn model<M: Into<MatchSpec>>(spec: M) -> Self {
        Self::Model(spec.into())
    }

    /// Match on the provider key
    pub fn provider<M: Into<MatchSpec>>(spec: M) -> Self {
        Self::Provider(spec.into())
    }

    /// Whether the condition holds for `target`
    pub fn matches(&self, target: &ParsedIdentifier) -> bool {
        match self {
            Self::ModelId(spec) => match_pattern(spec, &target.norm_id),
            Self::Model(spec) => match_pattern(spec, &target.norm_model),
            Self::Provider(spec) => match_pattern(spec, &target.norm_provider),
        }
    }
}
