//! View filter state.
//!
//! The "all sources" sentinel is a dedicated enum variant rather than a
//! magic string, so it can never collide with a real source tag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source restriction for the filter-sensitive queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFilter {
    /// No source restriction.
    #[default]
    All,
    /// Restrict to a single source tag.
    Only(String),
}

impl SourceFilter {
    /// Query parameter value, `None` when unrestricted.
    pub fn as_param(&self) -> Option<&str> {
        match self {
            SourceFilter::All => None,
            SourceFilter::Only(tag) => Some(tag),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SourceFilter::All)
    }
}

impl fmt::Display for SourceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFilter::All => f.write_str("all"),
            SourceFilter::Only(tag) => f.write_str(tag),
        }
    }
}

/// The active filter pair consumed by the post and trend queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub source: SourceFilter,
    pub search: String,
}

impl FilterState {
    /// Search parameter value, `None` when the trimmed text is empty.
    pub fn search_param(&self) -> Option<&str> {
        let trimmed = self.search.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sentinel_has_no_param() {
        assert_eq!(SourceFilter::All.as_param(), None);
        assert!(SourceFilter::All.is_all());
    }

    #[test]
    fn test_concrete_tag_param() {
        let filter = SourceFilter::Only("reddit".to_string());
        assert_eq!(filter.as_param(), Some("reddit"));
        assert!(!filter.is_all());
    }

    #[test]
    fn test_empty_search_has_no_param() {
        let state = FilterState::default();
        assert_eq!(state.search_param(), None);

        let blank = FilterState {
            search: "   ".to_string(),
            ..FilterState::default()
        };
        assert_eq!(blank.search_param(), None);
    }

    #[test]
    fn test_search_param_trimmed() {
        let state = FilterState {
            search: " rust ".to_string(),
            ..FilterState::default()
        };
        assert_eq!(state.search_param(), Some("rust"));
    }
}
