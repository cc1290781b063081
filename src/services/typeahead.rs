// src/services/typeahead.rs

//! Name lookup with a result card.

use serde::Serialize;

use crate::models::FacultyRecord;

/// Default number of suggestions.
pub const DEFAULT_LIMIT: usize = 10;

/// Records whose name contains `input`, case-insensitively, capped at
/// `limit`. Empty input suggests nothing. The input is not trimmed, so a
/// trailing space narrows the match.
pub fn suggest<'a>(
    records: &'a [FacultyRecord],
    input: &str,
    limit: usize,
) -> Vec<&'a FacultyRecord> {
    if input.is_empty() {
        return Vec::new();
    }
    let needle = input.to_lowercase();
    records
        .iter()
        .filter(|r| r.name.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

/// Card shown for a chosen suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeacherCard {
    pub name: String,
    pub cabin: String,
    pub department: String,
    pub image: Option<String>,
}

impl From<&FacultyRecord> for TeacherCard {
    fn from(record: &FacultyRecord) -> Self {
        Self {
            name: record.name.clone(),
            cabin: record.cabin_location.clone(),
            department: record.department.clone(),
            image: record.image.clone(),
        }
    }
}

/// Resolve a chosen suggestion by exact name. Duplicate names resolve to the
/// first record.
pub fn select(records: &[FacultyRecord], name: &str) -> Option<TeacherCard> {
    records
        .iter()
        .find(|r| r.name == name)
        .map(TeacherCard::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Config, RawFacultyRecord, RawId};
    use crate::services::Enricher;

    fn records(names: &[&str]) -> Vec<FacultyRecord> {
        let rows: Vec<RawFacultyRecord> = names
            .iter()
            .enumerate()
            .map(|(i, name)| RawFacultyRecord {
                id: Some(RawId::Number(i as i64 + 1)),
                name: Some(name.to_string()),
                department: Some("SCOPE".into()),
                cabin_location: Some(format!("AB1-{}", i)),
                image: (i == 0).then(|| "https://example.com/0.png".to_string()),
            })
            .collect();
        Enricher::from_config(&Config::default())
            .enrich(&rows)
            .records
    }

    #[test]
    fn test_empty_input_suggests_nothing() {
        let records = records(&["Dr. Asha Rao"]);
        assert!(suggest(&records, "", DEFAULT_LIMIT).is_empty());
    }

    #[test]
    fn test_suggest_case_insensitive_in_order() {
        let records = records(&["Dr. Asha Rao", "Prof. Ravi", "Meena Rao"]);
        let names: Vec<&str> = suggest(&records, "RAO", DEFAULT_LIMIT)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["Dr. Asha Rao", "Meena Rao"]);
    }

    #[test]
    fn test_suggest_caps_results() {
        let names: Vec<String> = (0..25).map(|i| format!("Dr. Person {}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let records = records(&refs);
        assert_eq!(suggest(&records, "person", DEFAULT_LIMIT).len(), 10);
        assert_eq!(suggest(&records, "person", 3).len(), 3);
    }

    #[test]
    fn test_select_builds_card() {
        let records = records(&["Dr. Asha Rao", "Meena Rao"]);
        let card = select(&records, "Dr. Asha Rao").unwrap();
        assert_eq!(card.cabin, "AB1-0");
        assert_eq!(card.department, "SCOPE");
        assert_eq!(card.image.as_deref(), Some("https://example.com/0.png"));
        assert!(select(&records, "Nobody").is_none());
    }
}
