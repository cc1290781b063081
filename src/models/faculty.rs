// src/models/faculty.rs

//! Raw dataset rows and enriched faculty records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Identifier as it appears in the dataset: a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    /// Parse into a record id. Returns `None` for negative, oversized or
    /// non-numeric values.
    pub fn parse(&self) -> Option<u32> {
        match self {
            RawId::Number(n) => u32::try_from(*n).ok(),
            RawId::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Number(n) => write!(f, "{}", n),
            RawId::Text(s) => write!(f, "{:?}", s),
        }
    }
}

/// One row of `cabins.json`.
///
/// Accepts both the directory shape (`department`, `cabin_location`) and the
/// older lookup shape (`dept`, `cabin`, `image`). Every field is optional here;
/// enrichment decides whether a row is kept, coerced or skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFacultyRecord {
    #[serde(default)]
    pub id: Option<RawId>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, alias = "dept")]
    pub department: Option<String>,

    #[serde(default, alias = "cabin")]
    pub cabin_location: Option<String>,

    /// Portrait URL (lookup shape only)
    #[serde(default)]
    pub image: Option<String>,
}

/// Academic rank inferred from the name prefix.
///
/// This is a coarse heuristic ("Prof." / "Dr." / anything else), not a
/// verified title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Designation {
    #[serde(rename = "Professor")]
    Professor,
    #[serde(rename = "Associate Professor")]
    AssociateProfessor,
    #[serde(rename = "Assistant Professor")]
    AssistantProfessor,
}

impl Designation {
    pub const ALL: [Designation; 3] = [
        Designation::Professor,
        Designation::AssociateProfessor,
        Designation::AssistantProfessor,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Designation::Professor => "Professor",
            Designation::AssociateProfessor => "Associate Professor",
            Designation::AssistantProfessor => "Assistant Professor",
        }
    }
}

impl fmt::Display for Designation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Designation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', '_'], " ");
        Designation::ALL
            .into_iter()
            .find(|d| d.label().to_lowercase() == wanted)
            .or(match wanted.as_str() {
                "prof" => Some(Designation::Professor),
                "associate" => Some(Designation::AssociateProfessor),
                "assistant" => Some(Designation::AssistantProfessor),
                _ => None,
            })
            .ok_or_else(|| AppError::validation(format!("Unknown designation '{}'", s)))
    }
}

/// A display-ready faculty member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyRecord {
    pub id: u32,
    pub name: String,
    pub designation: Designation,

    /// School code (e.g., "SCOPE")
    pub school: String,

    /// School display name
    pub school_name: String,

    pub department: String,

    /// Derived address; two people can map to the same one
    pub email: String,

    pub phone: String,
    pub intercom: String,
    pub qualification: String,
    pub cabin_location: String,
    pub specialization: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_id_accepts_number_and_numeric_text() {
        assert_eq!(RawId::Number(12).parse(), Some(12));
        assert_eq!(RawId::Text(" 7 ".into()).parse(), Some(7));
        assert_eq!(RawId::Text("abc".into()).parse(), None);
        assert_eq!(RawId::Number(-1).parse(), None);
    }

    #[test]
    fn raw_record_accepts_lookup_shape() {
        let raw: RawFacultyRecord = serde_json::from_str(
            r#"{"name":"Dr. Asha Rao","dept":"SCOPE","cabin":"AB1-301","image":"a.png"}"#,
        )
        .unwrap();
        assert_eq!(raw.id, None);
        assert_eq!(raw.department.as_deref(), Some("SCOPE"));
        assert_eq!(raw.cabin_location.as_deref(), Some("AB1-301"));
        assert_eq!(raw.image.as_deref(), Some("a.png"));
    }

    #[test]
    fn raw_record_accepts_directory_shape() {
        let raw: RawFacultyRecord = serde_json::from_str(
            r#"{"id":"1","name":"Prof. K. Iyer","department":"SAS","cabin_location":"AB2-110"}"#,
        )
        .unwrap();
        assert_eq!(raw.id, Some(RawId::Text("1".into())));
        assert_eq!(raw.cabin_location.as_deref(), Some("AB2-110"));
    }

    #[test]
    fn designation_serializes_as_label() {
        let json = serde_json::to_string(&Designation::AssociateProfessor).unwrap();
        assert_eq!(json, "\"Associate Professor\"");
    }

    #[test]
    fn designation_parses_labels_and_short_forms() {
        assert_eq!(
            "associate professor".parse::<Designation>().unwrap(),
            Designation::AssociateProfessor
        );
        assert_eq!(
            "Assistant-Professor".parse::<Designation>().unwrap(),
            Designation::AssistantProfessor
        );
        assert_eq!("prof".parse::<Designation>().unwrap(), Designation::Professor);
        assert!("dean".parse::<Designation>().is_err());
    }
}
