// src/models/school.rs

//! School lookup entries and aggregated school summaries.

use serde::{Deserialize, Serialize};

/// Department to school mapping entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolInfo {
    /// Department key as it appears in the dataset
    pub department: String,

    /// School code
    pub code: String,

    /// School display name
    pub name: String,
}

/// Department to default specializations entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecializationSet {
    pub department: String,
    pub specializations: Vec<String>,
}

/// One school with its faculty count, rebuilt on every dataset load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolSummary {
    pub code: String,
    pub name: String,
    pub dean: String,
    pub established: u16,
    pub faculty_count: usize,
    pub programs: Vec<String>,
    pub specializations: Vec<String>,
}
