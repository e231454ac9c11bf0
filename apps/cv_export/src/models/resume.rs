use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::RecordError;
use crate::models::overlay::OverlayTable;

/// A JSON Resume document plus the `x-i18n` overlay table and `x-atsData` keyword catalog.
///
/// Every section is optional on input. Absent sections deserialize as empty and
/// absent strings as blank, so renderers never have to special-case missing data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resume {
    pub basics: Basics,
    pub work: Vec<WorkEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillEntry>,
    pub languages: Vec<LanguageEntry>,
    pub certificates: Vec<CertificateEntry>,
    pub awards: Vec<AwardEntry>,
    pub publications: Vec<PublicationEntry>,
    #[serde(rename = "x-atsData", skip_serializing_if = "Option::is_none")]
    pub ats_data: Option<AtsData>,
    #[serde(rename = "x-i18n", skip_serializing_if = "BTreeMap::is_empty")]
    pub i18n: OverlayTable,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Basics {
    pub name: String,
    pub label: String,
    pub email: String,
    pub phone: String,
    pub url: Option<String>,
    pub summary: String,
    pub location: Location,
    pub profiles: Vec<Profile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Location {
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: String,
    pub region: String,
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub network: String,
    pub username: String,
    pub url: String,
}

/// A job. `name` is the organization, following the JSON Resume schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkEntry {
    pub id: String,
    pub name: String,
    pub position: String,
    pub location: Option<String>,
    pub url: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub summary: Option<String>,
    pub highlights: Vec<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: String,
    pub institution: String,
    pub url: Option<String>,
    pub area: String,
    pub study_type: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub score: Option<String>,
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillEntry {
    pub name: String,
    pub level: Option<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageEntry {
    pub language: String,
    pub fluency: String,
    /// Proficiency code such as `C1` or `Native`.
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateEntry {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: Option<String>,
    pub url: Option<String>,
    /// e.g. "in progress"; rendered in brackets when present.
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwardEntry {
    pub id: String,
    pub title: String,
    pub awarder: String,
    pub date: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PublicationEntry {
    pub id: String,
    pub name: String,
    pub publisher: String,
    pub release_date: Option<String>,
    pub url: Option<String>,
    pub summary: Option<String>,
}

/// The `x-atsData` block. Keyword categories are free-form; only list values carry keywords.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtsData {
    pub keywords: BTreeMap<String, Value>,
}

impl Resume {
    /// Reads and parses the record. Any failure here aborts the run.
    pub fn load(path: &Path) -> Result<Self, RecordError> {
        let raw = fs::read_to_string(path).map_err(|source| RecordError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| RecordError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// "First Last" taken from `basics.name`, used in output file names.
    pub fn short_name(&self) -> String {
        let parts: Vec<&str> = self.basics.name.split_whitespace().collect();
        match parts.as_slice() {
            [] => "CV".to_string(),
            [only] => only.to_string(),
            [first, .., last] => format!("{first} {last}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_document_deserializes_with_empty_sections() {
        let resume: Resume = serde_json::from_value(json!({
            "basics": { "name": "Ana Souza" }
        }))
        .unwrap();
        assert_eq!(resume.basics.name, "Ana Souza");
        assert!(resume.work.is_empty());
        assert!(resume.certificates.is_empty());
        assert!(resume.ats_data.is_none());
        assert!(resume.i18n.is_empty());
    }

    #[test]
    fn test_camel_case_and_extension_keys() {
        let resume: Resume = serde_json::from_value(json!({
            "work": [{ "id": "job1", "name": "Acme", "position": "Engineer", "startDate": "2020-01-01" }],
            "education": [{ "id": "edu1", "institution": "USP", "studyType": "BSc", "area": "CS" }],
            "x-atsData": { "keywords": { "core": ["Rust"], "note": "ignored" } },
            "x-i18n": { "en-US": { "work": { "job1": { "position": "Engineer" } } } }
        }))
        .unwrap();
        assert_eq!(resume.work[0].start_date.as_deref(), Some("2020-01-01"));
        assert_eq!(resume.education[0].study_type, "BSc");
        assert_eq!(resume.ats_data.unwrap().keywords.len(), 2);
        assert!(resume.i18n.contains_key("en-US"));
    }

    #[test]
    fn test_load_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("cv.json");
        assert!(matches!(Resume::load(&missing), Err(RecordError::Read { .. })));

        fs::write(&missing, "{ not json").unwrap();
        assert!(matches!(Resume::load(&missing), Err(RecordError::Parse { .. })));

        fs::write(&missing, r#"{"basics": {"name": "Ana"}}"#).unwrap();
        assert_eq!(Resume::load(&missing).unwrap().basics.name, "Ana");
    }

    #[test]
    fn test_short_name_first_and_last() {
        let mut resume = Resume::default();
        resume.basics.name = "Eduardo Silva da Costa".to_string();
        assert_eq!(resume.short_name(), "Eduardo Costa");
    }

    #[test]
    fn test_short_name_single_and_empty() {
        let mut resume = Resume::default();
        assert_eq!(resume.short_name(), "CV");
        resume.basics.name = "  Madonna ".to_string();
        assert_eq!(resume.short_name(), "Madonna");
    }
}
