//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{AcademicBlock, CampusProfile, SchoolInfo, SpecializationSet};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where and how the faculty dataset is fetched
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Listing, search and lookup behavior
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// Contact fields shared by every faculty record
    #[serde(default)]
    pub contact: ContactDefaults,

    /// Toast notification settings
    #[serde(default)]
    pub notify: NotifyConfig,

    /// CSV export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Console output settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Campus facts for the home, map and contact views
    #[serde(default = "defaults::campus")]
    pub campus: CampusProfile,

    /// Department to school table
    #[serde(default = "defaults::schools")]
    pub schools: Vec<SchoolInfo>,

    /// Department to specialization table
    #[serde(default = "defaults::specializations")]
    pub specializations: Vec<SpecializationSet>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.dataset.source.trim().is_empty() {
            return Err(AppError::validation("dataset.source is empty"));
        }
        if self.dataset.timeout_secs == 0 {
            return Err(AppError::validation("dataset.timeout_secs must be > 0"));
        }
        if self.directory.page_size == 0 {
            return Err(AppError::validation("directory.page_size must be > 0"));
        }
        if self.directory.typeahead_limit == 0 {
            return Err(AppError::validation(
                "directory.typeahead_limit must be > 0",
            ));
        }
        if self.directory.email_domain.trim().is_empty() {
            return Err(AppError::validation("directory.email_domain is empty"));
        }
        if self.export.file_name.trim().is_empty() {
            return Err(AppError::validation("export.file_name is empty"));
        }
        if self.schools.is_empty() {
            return Err(AppError::validation("No schools defined"));
        }
        if let Some(dup) = first_duplicate(self.schools.iter().map(|s| s.department.as_str())) {
            return Err(AppError::validation(format!(
                "Department '{}' mapped to more than one school",
                dup
            )));
        }
        if let Some(set) = self
            .specializations
            .iter()
            .find(|s| s.specializations.is_empty())
        {
            return Err(AppError::validation(format!(
                "Department '{}' has an empty specialization list",
                set.department
            )));
        }
        Ok(())
    }
}

fn first_duplicate<'a>(mut keys: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = std::collections::HashSet::new();
    keys.find(|k| !seen.insert(*k))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            directory: DirectoryConfig::default(),
            contact: ContactDefaults::default(),
            notify: NotifyConfig::default(),
            export: ExportConfig::default(),
            logging: LoggingConfig::default(),
            campus: defaults::campus(),
            schools: defaults::schools(),
            specializations: defaults::specializations(),
        }
    }
}

/// Dataset fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// File path or http(s) URL of `cabins.json`
    #[serde(default = "defaults::source")]
    pub source: String,

    /// Request timeout in seconds (URL sources only)
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            source: defaults::source(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// Listing, search and lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Records per page
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// Quiet window for search-as-you-type, in milliseconds
    #[serde(default = "defaults::debounce")]
    pub debounce_ms: u64,

    /// Domain appended to derived email addresses
    #[serde(default = "defaults::email_domain")]
    pub email_domain: String,

    /// Maximum number of lookup suggestions
    #[serde(default = "defaults::typeahead_limit")]
    pub typeahead_limit: usize,

    /// Accelerator that focuses the search input (e.g. "ctrl+k")
    #[serde(default = "defaults::focus_shortcut")]
    pub focus_shortcut: String,
}

impl DirectoryConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::page_size(),
            debounce_ms: defaults::debounce(),
            email_domain: defaults::email_domain(),
            typeahead_limit: defaults::typeahead_limit(),
            focus_shortcut: defaults::focus_shortcut(),
        }
    }
}

/// Placeholder contact details applied to every record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactDefaults {
    #[serde(default = "defaults::phone")]
    pub phone: String,

    #[serde(default = "defaults::intercom")]
    pub intercom: String,

    #[serde(default = "defaults::qualification")]
    pub qualification: String,
}

impl Default for ContactDefaults {
    fn default() -> Self {
        Self {
            phone: defaults::phone(),
            intercom: defaults::intercom(),
            qualification: defaults::qualification(),
        }
    }
}

/// Toast notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// How long a toast stays visible
    #[serde(default = "defaults::display_secs")]
    pub display_secs: u64,
}

impl NotifyConfig {
    pub fn display(&self) -> Duration {
        Duration::from_secs(self.display_secs)
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            display_secs: defaults::display_secs(),
        }
    }
}

/// CSV export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "defaults::export_file")]
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: defaults::export_file(),
        }
    }
}

/// Console output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of "debug", "info", "warn", "error"
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    use super::{AcademicBlock, CampusProfile, SchoolInfo, SpecializationSet};

    // Dataset defaults
    pub fn source() -> String {
        "data/cabins.json".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; directory/0.1)".into()
    }

    // Directory defaults
    pub fn page_size() -> usize {
        9
    }
    pub fn debounce() -> u64 {
        300
    }
    pub fn email_domain() -> String {
        "vit.ac.in".into()
    }
    pub fn typeahead_limit() -> usize {
        10
    }
    pub fn focus_shortcut() -> String {
        "ctrl+k".into()
    }

    // Contact defaults
    pub fn phone() -> String {
        "+91-44-39931000".into()
    }
    pub fn intercom() -> String {
        "1000".into()
    }
    pub fn qualification() -> String {
        "Ph.D".into()
    }

    // Notification / export / logging defaults
    pub fn display_secs() -> u64 {
        3
    }
    pub fn export_file() -> String {
        "vit_chennai_faculty.csv".into()
    }
    pub fn log_level() -> String {
        "info".into()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn block(name: &str, floors: u8, facilities: &[&str]) -> AcademicBlock {
        AcademicBlock {
            name: name.to_string(),
            floors,
            facilities: strings(facilities),
        }
    }

    // Campus defaults
    pub fn campus() -> CampusProfile {
        CampusProfile {
            name: "Vellore Institute of Technology - Chennai Campus".to_string(),
            established: 2010,
            location: "Vandalur-Kelambakkam Road, Chennai-600127, Tamil Nadu, India".to_string(),
            phone: "+91 44 3993 1555".to_string(),
            fax: "+91-44 3993 2555".to_string(),
            email: "admin.chennai@vit.ac.in".to_string(),
            area_acres: 192,
            total_faculty: "300+".to_string(),
            academic_blocks: vec![
                block(
                    "Academic Block 1 (AB1)",
                    8,
                    &["Amphitheater", "Classrooms", "Faculty Cabins", "Labs"],
                ),
                block(
                    "Academic Block 2 (AB2)",
                    7,
                    &["Classrooms", "Faculty Cabins", "Labs", "Offices"],
                ),
                block(
                    "Admin Block",
                    8,
                    &["Administrative Offices", "Dean Offices", "Meeting Rooms"],
                ),
                block("Delta Block", 4, &["Faculty Cabins", "Research Labs", "Offices"]),
                block("Sigma Block", 4, &["Faculty Cabins", "Labs", "Offices"]),
                block(
                    "Health Centre",
                    3,
                    &["Medical Facilities", "Faculty Cabins", "Offices"],
                ),
            ],
        }
    }

    fn school(code: &str, name: &str) -> SchoolInfo {
        SchoolInfo {
            department: code.to_string(),
            code: code.to_string(),
            name: name.to_string(),
        }
    }

    // Lookup table defaults
    pub fn schools() -> Vec<SchoolInfo> {
        vec![
            school("SELECT", "School of Electrical Engineering"),
            school("VITBS", "VIT Business School"),
            school("SAS", "School of Advanced Sciences"),
            school("SSL", "School of Social Sciences and Languages"),
            school("SMEC", "School of Mechanical Engineering"),
            school("SCE", "School of Civil Engineering"),
            school("VFIT", "VIT Fashion Institute of Technology"),
            school("SENSE", "School of Electronics Engineering"),
            school("VITSOL", "VIT School of Law"),
            school("SCOPE", "School of Computer Science and Engineering"),
        ]
    }

    fn set(department: &str, specializations: &[&str]) -> SpecializationSet {
        SpecializationSet {
            department: department.to_string(),
            specializations: strings(specializations),
        }
    }

    pub fn specializations() -> Vec<SpecializationSet> {
        vec![
            set("SELECT", &["Power Systems", "Control Systems", "Renewable Energy"]),
            set("VITBS", &["Management Studies", "Finance", "Marketing"]),
            set("SAS", &["Physics", "Mathematics", "Chemistry"]),
            set("SSL", &["Language Studies", "Social Sciences", "Communication"]),
            set(
                "SMEC",
                &["Mechanical Engineering", "Manufacturing", "Thermal Engineering"],
            ),
            set(
                "SCE",
                &[
                    "Structural Engineering",
                    "Environmental Engineering",
                    "Construction Management",
                ],
            ),
            set("VFIT", &["Fashion Technology", "Textile Engineering", "Design"]),
            set("SENSE", &["Electronics", "Signal Processing", "VLSI Design"]),
            set("VITSOL", &["Law", "Legal Studies", "Jurisprudence"]),
            set(
                "SCOPE",
                &["Computer Science", "Software Engineering", "Data Science"],
            ),
        ]
    }
}
