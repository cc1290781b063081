// src/services/schools.rs

//! Per-school summaries built from the loaded records.

use crate::models::{FacultyRecord, SchoolSummary};
use crate::services::LookupTables;

const PROGRAMS: [&str; 3] = ["B.Tech", "M.Tech", "Ph.D"];
const SPECIALIZATIONS: [&str; 3] = ["Engineering", "Technology", "Research"];
const DEAN: &str = "TBA";
const ESTABLISHED: u16 = 2010;

/// One summary per distinct school code, in order of first appearance.
pub fn summarize(records: &[FacultyRecord], tables: &LookupTables) -> Vec<SchoolSummary> {
    let mut schools: Vec<SchoolSummary> = Vec::new();

    for record in records {
        match schools.iter_mut().find(|s| s.code == record.school) {
            Some(school) => school.faculty_count += 1,
            None => schools.push(SchoolSummary {
                code: record.school.clone(),
                name: tables
                    .school_name(&record.school)
                    .unwrap_or(&record.school)
                    .to_string(),
                dean: DEAN.to_string(),
                established: ESTABLISHED,
                faculty_count: 1,
                programs: PROGRAMS.iter().map(|s| s.to_string()).collect(),
                specializations: SPECIALIZATIONS.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }

    schools
}

/// Headline numbers for the home view.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct HomeStats {
    pub total_faculty: usize,
    pub total_schools: usize,
    pub campus_area_acres: u32,
}

impl HomeStats {
    pub fn new(records: &[FacultyRecord], schools: &[SchoolSummary], area_acres: u32) -> Self {
        Self {
            total_faculty: records.len(),
            total_schools: schools.len(),
            campus_area_acres: area_acres,
        }
    }
}
