// src/models/campus.rs

//! Static campus information shown by the home, map and contact views.

use serde::{Deserialize, Serialize};

/// Campus-wide facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampusProfile {
    /// Campus name (e.g., "Vellore Institute of Technology - Chennai Campus")
    pub name: String,

    pub established: u16,

    /// Postal address
    pub location: String,

    pub phone: String,
    pub fax: String,
    pub email: String,
    pub area_acres: u32,

    /// Free-form label such as "300+"
    pub total_faculty: String,

    #[serde(default)]
    pub academic_blocks: Vec<AcademicBlock>,
}

/// A building on campus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicBlock {
    pub name: String,
    pub floors: u8,
    pub facilities: Vec<String>,
}
