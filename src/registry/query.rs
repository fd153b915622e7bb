//! # Query Engine
//!
//! Ranked lookups over the registry. Every list this module returns is
//! ordered by [`rank`]: most-used first, ties broken by path.

use super::error::RegistryError;
use super::store::{Project, Registry};
use regex::RegexBuilder;
use std::cmp::Ordering;

/// Number of projects shown when no search terms are given
pub const DEFAULT_TOP_N: usize = 10;

/// Separator placed between search terms when they are combined
pub const TERM_SEPARATOR: &str = ".*";

/// Total order used for every ranked list: usage count descending, then path
/// ascending
pub fn rank(a: &Project, b: &Project) -> Ordering {
    b.usage_count
        .cmp(&a.usage_count)
        .then_with(|| a.path.cmp(&b.path))
}

/// Join search terms into one expression that matches them in order
///
/// `["foo", "bar", "baz"]` becomes `foo.*bar.*baz`.
pub fn compose_expression<S: AsRef<str>>(terms: &[S]) -> String {
    terms
        .iter()
        .map(|term| term.as_ref())
        .collect::<Vec<&str>>()
        .join(TERM_SEPARATOR)
}

fn ranked_paths(mut projects: Vec<&Project>) -> Vec<String> {
    projects.sort_by(|a, b| rank(a, b));
    projects.into_iter().map(|p| p.path.clone()).collect()
}

impl Registry {
    /// Up to `n` paths from the whole registry, best ranked first
    pub fn top_n(&self, n: usize) -> Vec<String> {
        let mut paths = ranked_paths(self.projects().collect());
        paths.truncate(n);
        paths
    }

    /// Every path containing a match for `expression`, ranked
    ///
    /// The expression is searched for anywhere in the full path. Unless the
    /// registry is case-sensitive, letter case is ignored on both sides.
    pub fn match_pattern(&self, expression: &str) -> Result<Vec<String>, RegistryError> {
        let pattern = RegexBuilder::new(expression)
            .case_insensitive(!self.case_sensitive())
            .build()?;

        let matches = self
            .projects()
            .filter(|project| pattern.is_match(&project.path))
            .collect();

        Ok(ranked_paths(matches))
    }
}
