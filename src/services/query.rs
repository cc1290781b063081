// src/services/query.rs

//! Query engine: conjunctive search and filters over enriched records.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::{Designation, FacultyRecord, QueryState, non_empty};

/// Run a query. Result order is the input order.
pub fn query<'a>(records: &'a [FacultyRecord], state: &QueryState) -> Vec<&'a FacultyRecord> {
    if state.is_unfiltered() {
        return records.iter().collect();
    }
    let term = state.normalized_term();
    records
        .iter()
        .filter(|record| matches(record, state, &term))
        .collect()
}

/// Apply all four predicates to one record. `term` must already be
/// normalized.
fn matches(record: &FacultyRecord, state: &QueryState, term: &str) -> bool {
    matches_search(record, term)
        && non_empty(&state.school_filter).is_none_or(|code| record.school == code)
        && state
            .designation_filter
            .is_none_or(|designation| record.designation == designation)
        && non_empty(&state.department_filter).is_none_or(|dept| record.department == dept)
}

/// Case-insensitive substring match over name, department, cabin and
/// specializations. An empty term matches everything.
pub fn matches_search(record: &FacultyRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    record.name.to_lowercase().contains(term)
        || record.department.to_lowercase().contains(term)
        || record.cabin_location.to_lowercase().contains(term)
        || record
            .specialization
            .iter()
            .any(|spec| spec.to_lowercase().contains(term))
}

/// Distinct values offered by the filter selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub schools: Vec<String>,
    pub designations: Vec<Designation>,
    pub departments: Vec<String>,
}

/// Collect sorted distinct schools, designations and departments.
pub fn filter_options(records: &[FacultyRecord]) -> FilterOptions {
    let schools: BTreeSet<&str> = records.iter().map(|r| r.school.as_str()).collect();
    let departments: BTreeSet<&str> = records.iter().map(|r| r.department.as_str()).collect();

    let mut designations: Vec<Designation> = Vec::new();
    for record in records {
        if !designations.contains(&record.designation) {
            designations.push(record.designation);
        }
    }
    designations.sort_by_key(|d| d.label());

    FilterOptions {
        schools: schools.into_iter().map(String::from).collect(),
        designations,
        departments: departments.into_iter().map(String::from).collect(),
    }
}
