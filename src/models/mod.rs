// src/models/mod.rs

//! Domain models for the directory application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod campus;
mod config;
mod faculty;
mod query;
mod school;

// Re-export all public types
pub use campus::{AcademicBlock, CampusProfile};
pub use config::{
    Config, ContactDefaults, DatasetConfig, DirectoryConfig, ExportConfig, LoggingConfig,
    NotifyConfig,
};
pub use faculty::{Designation, FacultyRecord, RawFacultyRecord, RawId};
pub(crate) use query::non_empty;
pub use query::QueryState;
pub use school::{SchoolInfo, SchoolSummary, SpecializationSet};

/// Why a dataset row was skipped or altered during enrichment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecordIssue {
    /// Zero-based position of the row in the dataset
    pub index: usize,
    pub kind: IssueKind,
    pub reason: String,
}

/// Outcome of a problematic row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Row dropped from the dataset
    Skipped,
    /// Row kept with a documented default
    Coerced,
}

/// The loaded dataset. Read-only once built.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct Directory {
    pub records: Vec<FacultyRecord>,
    pub schools: Vec<SchoolSummary>,
    pub issues: Vec<RecordIssue>,

    /// Set when the dataset could not be loaded at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
}

impl Directory {
    /// Empty directory standing in for a dataset that failed to load.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            load_error: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn is_load_failed(&self) -> bool {
        self.load_error.is_some()
    }

    /// Find a record by id.
    pub fn get(&self, id: u32) -> Option<&FacultyRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows that were dropped while loading.
    pub fn skipped_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.kind == IssueKind::Skipped)
            .count()
    }
}
