//! ATS keyword extraction — a bounded, sorted, deduplicated term list for
//! applicant-tracking systems.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::models::resume::Resume;

pub const MAX_ATS_KEYWORDS: usize = 50;

/// Unions keywords from `x-atsData.keywords`, every skill and every job, then
/// sorts and keeps the first [`MAX_ATS_KEYWORDS`]. Case-sensitive; no normalization.
pub fn extract_ats_keywords(resume: &Resume) -> Vec<String> {
    let mut keywords: BTreeSet<&str> = BTreeSet::new();

    if let Some(ats) = &resume.ats_data {
        for category in ats.keywords.values() {
            if let Value::Array(items) = category {
                keywords.extend(items.iter().filter_map(Value::as_str));
            }
        }
    }

    for skill in &resume.skills {
        keywords.extend(skill.keywords.iter().map(String::as_str));
    }

    for job in &resume.work {
        keywords.extend(job.keywords.iter().map(String::as_str));
    }

    keywords
        .into_iter()
        .take(MAX_ATS_KEYWORDS)
        .map(str::to_string)
        .collect()
}
