// src/models/query.rs

//! Query state: search term, active filters and current page.

use serde::{Deserialize, Serialize};

use crate::models::Designation;

/// Current search term + filter values + page.
///
/// `QueryState::default()` is the cleared state: empty term, no filters,
/// page 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    #[serde(default)]
    pub search_term: String,

    #[serde(default)]
    pub school_filter: Option<String>,

    #[serde(default)]
    pub designation_filter: Option<Designation>,

    #[serde(default)]
    pub department_filter: Option<String>,

    #[serde(default = "first_page")]
    pub page: usize,
}

fn first_page() -> usize {
    1
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            school_filter: None,
            designation_filter: None,
            department_filter: None,
            page: first_page(),
        }
    }
}

impl QueryState {
    /// Builder-style search term setter.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_school(mut self, code: impl Into<String>) -> Self {
        self.school_filter = Some(code.into());
        self
    }

    pub fn with_designation(mut self, designation: Designation) -> Self {
        self.designation_filter = Some(designation);
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department_filter = Some(department.into());
        self
    }

    /// Search term as matched: trimmed and lower-cased.
    pub fn normalized_term(&self) -> String {
        self.search_term.trim().to_lowercase()
    }

    /// True when no predicate narrows the result set.
    pub fn is_unfiltered(&self) -> bool {
        self.normalized_term().is_empty()
            && non_empty(&self.school_filter).is_none()
            && self.designation_filter.is_none()
            && non_empty(&self.department_filter).is_none()
    }
}

/// Treat `Some("")` the same as `None`, as an "All ..." selector does.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_cleared_state() {
        let state = QueryState::default();
        assert_eq!(state.page, 1);
        assert!(state.is_unfiltered());
    }

    #[test]
    fn blank_values_count_as_unfiltered() {
        let mut state = QueryState::default().with_search("   ");
        state.school_filter = Some(String::new());
        assert!(state.is_unfiltered());
        assert!(!state.with_department("SCOPE").is_unfiltered());
    }

    #[test]
    fn normalized_term_trims_and_lowercases() {
        let state = QueryState::default().with_search("  AB1 ");
        assert_eq!(state.normalized_term(), "ab1");
    }
}
