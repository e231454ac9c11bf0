//! Sparse per-locale overrides. Every field is optional; a present field replaces
//! the base value wholesale, an absent one leaves it alone.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::resume::{Location, Profile};

/// Locale tag → overrides for that locale.
pub type OverlayTable = BTreeMap<String, LocaleOverlay>;

/// Entry identifier → field overrides for that entry.
pub type EntryOverrides<T> = BTreeMap<String, T>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleOverlay {
    pub basics: Option<BasicsOverlay>,
    pub work: EntryOverrides<WorkOverlay>,
    pub education: EntryOverrides<EducationOverlay>,
    pub awards: EntryOverrides<AwardOverlay>,
    pub certificates: EntryOverrides<CertificateOverlay>,
}

impl LocaleOverlay {
    pub fn is_empty(&self) -> bool {
        self.basics.is_none()
            && self.work.is_empty()
            && self.education.is_empty()
            && self.awards.is_empty()
            && self.certificates.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicsOverlay {
    pub name: Option<String>,
    pub label: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub url: Option<String>,
    pub summary: Option<String>,
    pub location: Option<Location>,
    pub profiles: Option<Vec<Profile>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkOverlay {
    pub name: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub summary: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationOverlay {
    pub institution: Option<String>,
    pub url: Option<String>,
    pub area: Option<String>,
    pub study_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub score: Option<String>,
    pub courses: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwardOverlay {
    pub title: Option<String>,
    pub awarder: Option<String>,
    pub date: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateOverlay {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub date: Option<String>,
    pub url: Option<String>,
    pub status: Option<String>,
}
