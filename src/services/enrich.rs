// src/services/enrich.rs

//! Record enrichment.
//!
//! Turns raw dataset rows into display-ready [`FacultyRecord`]s. Every derived
//! field is a pure function of the row and the static lookup tables.
//!
//! Two derivations are lossy heuristics: designation comes from the name
//! prefix only, and derived emails may collide for different people.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::models::{
    Config, ContactDefaults, Designation, FacultyRecord, IssueKind, RawFacultyRecord, RecordIssue,
    SchoolInfo, SpecializationSet,
};

static TITLE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(Dr\.|Prof\.)\s+").expect("title prefix pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Specialization list for departments missing from the table.
pub const GENERAL_STUDIES: &str = "General Studies";

/// Infer the designation from the name prefix.
pub fn designation(name: &str) -> Designation {
    if name.starts_with("Prof.") {
        Designation::Professor
    } else if name.starts_with("Dr.") {
        Designation::AssociateProfessor
    } else {
        Designation::AssistantProfessor
    }
}

/// Derive an institutional email address from a display name.
///
/// Uses `first.last@domain` when at least two name tokens longer than one
/// character remain after dropping the title; otherwise joins the whole name
/// with dots. Characters outside `[a-z0-9.@]` are removed.
pub fn email(name: &str, domain: &str) -> String {
    let clean = TITLE_PREFIX.replace(name, "").to_lowercase();
    let parts: Vec<&str> = clean
        .split(' ')
        .filter(|part| part.chars().count() > 1)
        .collect();

    let raw = match parts.as_slice() {
        [first, .., last] => format!("{}.{}@{}", first, last, domain),
        _ => format!("{}@{}", WHITESPACE.replace_all(&clean, "."), domain),
    };

    raw.chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '.' || *c == '@')
        .collect()
}

/// Static department lookup tables.
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    schools: HashMap<String, (String, String)>,
    specializations: HashMap<String, Vec<String>>,
}

impl LookupTables {
    pub fn new(schools: &[SchoolInfo], specializations: &[SpecializationSet]) -> Self {
        Self {
            schools: schools
                .iter()
                .map(|s| (s.department.clone(), (s.code.clone(), s.name.clone())))
                .collect(),
            specializations: specializations
                .iter()
                .map(|s| (s.department.clone(), s.specializations.clone()))
                .collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.schools, &config.specializations)
    }

    /// School `(code, name)` for a department; unknown departments stand for
    /// themselves.
    pub fn school(&self, department: &str) -> (String, String) {
        self.schools
            .get(department)
            .cloned()
            .unwrap_or_else(|| (department.to_string(), department.to_string()))
    }

    /// School display name for a school code, if the code is in the table.
    pub fn school_name(&self, code: &str) -> Option<&str> {
        self.schools
            .values()
            .find(|(c, _)| c == code)
            .map(|(_, name)| name.as_str())
    }

    /// Default specializations for a department.
    pub fn specializations(&self, department: &str) -> Vec<String> {
        self.specializations
            .get(department)
            .cloned()
            .unwrap_or_else(|| vec![GENERAL_STUDIES.to_string()])
    }
}

/// Records produced from a batch plus the rows that needed attention.
#[derive(Debug, Clone, Default)]
pub struct EnrichOutcome {
    pub records: Vec<FacultyRecord>,
    pub issues: Vec<RecordIssue>,
}

/// Applies the lookup tables and contact defaults to raw rows.
#[derive(Debug, Clone)]
pub struct Enricher {
    tables: LookupTables,
    email_domain: String,
    contact: ContactDefaults,
}

impl Enricher {
    pub fn new(tables: LookupTables, email_domain: impl Into<String>, contact: ContactDefaults) -> Self {
        Self {
            tables,
            email_domain: email_domain.into(),
            contact,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            LookupTables::from_config(config),
            config.directory.email_domain.clone(),
            config.contact.clone(),
        )
    }

    pub fn tables(&self) -> &LookupTables {
        &self.tables
    }

    /// Enrich typed rows, preserving order.
    pub fn enrich(&self, rows: &[RawFacultyRecord]) -> EnrichOutcome {
        let mut outcome = EnrichOutcome::default();
        for (index, raw) in rows.iter().enumerate() {
            if let Some(record) = self.enrich_row(index, raw, &mut outcome.issues) {
                outcome.records.push(record);
            }
        }
        outcome
    }

    /// Enrich untyped JSON rows. A row that does not deserialize is skipped
    /// and reported; the rest of the batch is unaffected.
    pub fn enrich_values(&self, rows: Vec<Value>) -> EnrichOutcome {
        let mut outcome = EnrichOutcome::default();
        for (index, value) in rows.into_iter().enumerate() {
            match serde_json::from_value::<RawFacultyRecord>(value) {
                Ok(raw) => {
                    if let Some(record) = self.enrich_row(index, &raw, &mut outcome.issues) {
                        outcome.records.push(record);
                    }
                }
                Err(e) => outcome.issues.push(skip(index, format!("unreadable row: {}", e))),
            }
        }
        outcome
    }

    fn enrich_row(
        &self,
        index: usize,
        raw: &RawFacultyRecord,
        issues: &mut Vec<RecordIssue>,
    ) -> Option<FacultyRecord> {
        let Some(name) = required(&raw.name) else {
            issues.push(skip(index, "missing name"));
            return None;
        };
        let Some(department) = required(&raw.department) else {
            issues.push(skip(index, format!("missing department for '{}'", name)));
            return None;
        };

        let id = match &raw.id {
            Some(raw_id) => match raw_id.parse() {
                Some(id) => id,
                None => {
                    issues.push(skip(index, format!("invalid id {} for '{}'", raw_id, name)));
                    return None;
                }
            },
            None => {
                let position = u32::try_from(index + 1).unwrap_or(u32::MAX);
                issues.push(coerce(
                    index,
                    format!("missing id for '{}', using position {}", name, position),
                ));
                position
            }
        };

        let cabin_location = match &raw.cabin_location {
            Some(cabin) => cabin.clone(),
            None => {
                issues.push(coerce(index, format!("missing cabin for '{}'", name)));
                String::new()
            }
        };

        let (school, school_name) = self.tables.school(department);

        Some(FacultyRecord {
            id,
            name: name.to_string(),
            designation: designation(name),
            school,
            school_name,
            department: department.to_string(),
            email: email(name, &self.email_domain),
            phone: self.contact.phone.clone(),
            intercom: self.contact.intercom.clone(),
            qualification: self.contact.qualification.clone(),
            cabin_location,
            specialization: self.tables.specializations(department),
            image: raw.image.clone().filter(|url| !url.trim().is_empty()),
        })
    }
}

fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.trim().is_empty())
}

fn skip(index: usize, reason: impl Into<String>) -> RecordIssue {
    let issue = RecordIssue {
        index,
        kind: IssueKind::Skipped,
        reason: reason.into(),
    };
    log::warn!("Skipping dataset row {}: {}", index, issue.reason);
    issue
}

fn coerce(index: usize, reason: impl Into<String>) -> RecordIssue {
    let issue = RecordIssue {
        index,
        kind: IssueKind::Coerced,
        reason: reason.into(),
    };
    log::debug!("Coerced dataset row {}: {}", index, issue.reason);
    issue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawId;

    fn enricher() -> Enricher {
        Enricher::from_config(&Config::default())
    }

    fn raw(id: i64, name: &str, department: &str, cabin: &str) -> RawFacultyRecord {
        RawFacultyRecord {
            id: Some(RawId::Number(id)),
            name: Some(name.to_string()),
            department: Some(department.to_string()),
            cabin_location: Some(cabin.to_string()),
            image: None,
        }
    }

    #[test]
    fn test_designation_from_prefix() {
        assert_eq!(designation("Prof. K. Iyer"), Designation::Professor);
        assert_eq!(designation("Dr. Asha Rao"), Designation::AssociateProfessor);
        assert_eq!(designation("Meena S"), Designation::AssistantProfessor);
        // Only the literal prefix counts
        assert_eq!(designation("Professor Rao"), Designation::AssistantProfessor);
    }

    #[test]
    fn test_email_first_and_last_token() {
        assert_eq!(email("Dr. Asha Rao", "vit.ac.in"), "asha.rao@vit.ac.in");
        assert_eq!(
            email("Prof. Ravi Kumar Sharma", "vit.ac.in"),
            "ravi.sharma@vit.ac.in"
        );
    }

    #[test]
    fn test_email_drops_initials() {
        // "k." is two characters and survives the length filter
        assert_eq!(email("Prof. K. Iyer", "vit.ac.in"), "k..iyer@vit.ac.in");
        // a single long token falls back to dot-joining the whole name
        assert_eq!(email("Meena S", "vit.ac.in"), "meena.s@vit.ac.in");
    }

    #[test]
    fn test_email_single_token_joins_with_dots() {
        assert_eq!(email("Dr. Asha", "vit.ac.in"), "asha@vit.ac.in");
    }

    #[test]
    fn test_email_strips_disallowed_characters() {
        assert_eq!(
            email("Dr. Anne-Marie O'Neil", "vit.ac.in"),
            "annemarie.oneil@vit.ac.in"
        );
    }

    #[test]
    fn test_email_collisions_are_kept() {
        assert_eq!(
            email("Dr. Asha Rao", "vit.ac.in"),
            email("Asha K Rao", "vit.ac.in")
        );
    }

    #[test]
    fn test_lookup_tables_fall_back() {
        let tables = LookupTables::from_config(&Config::default());
        assert_eq!(
            tables.school("SCOPE"),
            (
                "SCOPE".to_string(),
                "School of Computer Science and Engineering".to_string()
            )
        );
        assert_eq!(
            tables.school("LIBRARY"),
            ("LIBRARY".to_string(), "LIBRARY".to_string())
        );
        assert_eq!(tables.specializations("LIBRARY"), vec!["General Studies"]);
        assert_eq!(tables.school_name("SAS"), Some("School of Advanced Sciences"));
        assert_eq!(tables.school_name("LIBRARY"), None);
    }

    #[test]
    fn test_enrich_example_record() {
        let outcome = enricher().enrich(&[raw(1, "Dr. Asha Rao", "SCOPE", "AB1-301")]);
        assert!(outcome.issues.is_empty());

        let record = &outcome.records[0];
        assert_eq!(record.id, 1);
        assert_eq!(record.designation, Designation::AssociateProfessor);
        assert_eq!(record.designation.to_string(), "Associate Professor");
        assert_eq!(record.email, "asha.rao@vit.ac.in");
        assert_eq!(record.school, "SCOPE");
        assert_eq!(
            record.school_name,
            "School of Computer Science and Engineering"
        );
        assert_eq!(
            record.specialization,
            vec!["Computer Science", "Software Engineering", "Data Science"]
        );
        assert_eq!(record.cabin_location, "AB1-301");
        assert_eq!(record.phone, "+91-44-39931000");
    }

    #[test]
    fn test_enrich_preserves_order_and_is_deterministic() {
        let rows = vec![
            raw(3, "Prof. C", "SAS", "x"),
            raw(1, "Dr. A", "SCE", "y"),
            raw(2, "B Person", "Unknown", "z"),
        ];
        let first = enricher().enrich(&rows);
        let second = enricher().enrich(&rows);
        let ids: Vec<u32> = first.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(first.records, second.records);
    }

    #[test]
    fn test_enrich_skips_invalid_id() {
        let mut bad = raw(0, "Dr. Bad Id", "SAS", "AB1");
        bad.id = Some(RawId::Text("n/a".into()));
        let outcome = enricher().enrich(&[bad, raw(2, "Dr. Good", "SAS", "AB2")]);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].id, 2);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].index, 0);
        assert_eq!(outcome.issues[0].kind, IssueKind::Skipped);
    }

    #[test]
    fn test_enrich_coerces_missing_id_and_cabin() {
        let row = RawFacultyRecord {
            id: None,
            name: Some("Dr. Legacy Row".into()),
            department: Some("SENSE".into()),
            cabin_location: None,
            image: Some("https://example.com/p.png".into()),
        };
        let outcome = enricher().enrich(&[raw(1, "Dr. A", "SAS", "AB1"), row]);

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[1].id, 2);
        assert_eq!(outcome.records[1].cabin_location, "");
        assert_eq!(
            outcome.records[1].image.as_deref(),
            Some("https://example.com/p.png")
        );
        assert_eq!(outcome.issues.len(), 2);
        assert!(outcome.issues.iter().all(|i| i.kind == IssueKind::Coerced));
    }

    #[test]
    fn test_enrich_values_skips_unreadable_rows() {
        let rows: Vec<Value> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Dr. Asha Rao", "department": "SCOPE", "cabin_location": "AB1-301"},
                "not an object",
                {"id": 2.5, "name": "Dr. Float", "department": "SAS", "cabin_location": "AB2"},
                {"id": 3, "name": "", "department": "SAS", "cabin_location": "AB2"},
                {"id": 4, "name": "Prof. Kept", "dept": "SAS", "cabin": "AB2-001"}
            ]"#,
        )
        .unwrap();
        let outcome = enricher().enrich_values(rows);

        let ids: Vec<u32> = outcome.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 4]);
        let skipped: Vec<usize> = outcome.issues.iter().map(|i| i.index).collect();
        assert_eq!(skipped, vec![1, 2, 3]);
    }
}
