//! Recursive term matching over arbitrary `Value` trees
//!
//! Matching rules per value kind:
//!
//! | kind    | matches when                                          |
//! |---------|-------------------------------------------------------|
//! | string  | the term is a substring (case-sensitive)              |
//! | number  | the term equals the number's decimal form exactly     |
//! | boolean | the term equals `"True"` or `"False"`                 |
//! | null    | never                                                 |
//! | mapping | the term matches inside any value; keys are ignored   |
//! | list    | see [`ListScan`]                                      |

use serde_json::{Map, Number, Value};

/// Canonical text form of `true` for matching
pub const TRUE_TERM: &str = "True";
/// Canonical text form of `false` for matching
pub const FALSE_TERM: &str = "False";

/// How lists are inspected while matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListScan {
    /// Only the first element decides the result (default)
    ///
    /// `["abc", "xyz"]` does not match `"xyz"`. Existing search results rely
    /// on this, so a full scan is opt-in.
    #[default]
    FirstElement,
    /// Any element may match
    AllElements,
}

/// Term matcher with a configurable list policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TermMatcher {
    list_scan: ListScan,
}

impl TermMatcher {
    /// Matcher with the default first-element list policy
    #[must_use]
    pub const fn new() -> Self {
        Self {
            list_scan: ListScan::FirstElement,
        }
    }

    /// Set the list policy
    #[must_use]
    pub const fn list_scan(mut self, list_scan: ListScan) -> Self {
        self.list_scan = list_scan;
        self
    }

    /// Decide whether `term` appears anywhere inside `value`
    #[must_use]
    pub fn matches(&self, value: &Value, term: &str) -> bool {
        match value {
            Value::Null => false,
            Value::Bool(b) => bool_matches(*b, term),
            Value::Number(n) => number_matches(n, term),
            Value::String(s) => s.contains(term),
            Value::Object(map) => self.matches_mapping(map, term),
            Value::Array(items) => self.matches_list(items, term),
        }
    }

    fn matches_mapping(&self, map: &Map<String, Value>, term: &str) -> bool {
        map.values().any(|v| self.matches(v, term))
    }

    fn matches_list(&self, items: &[Value], term: &str) -> bool {
        match self.list_scan {
            ListScan::FirstElement => items.first().is_some_and(|v| self.matches(v, term)),
            ListScan::AllElements => items.iter().any(|v| self.matches(v, term)),
        }
    }
}

/// Decide whether `term` appears anywhere inside `value` using the default matcher
#[must_use]
pub fn contains_term(value: &Value, term: &str) -> bool {
    TermMatcher::new().matches(value, term)
}

fn bool_matches(b: bool, term: &str) -> bool {
    term == if b { TRUE_TERM } else { FALSE_TERM }
}

fn number_matches(n: &Number, term: &str) -> bool {
    n.to_string() == term
}
