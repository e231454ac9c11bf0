//! Locale table: the fixed set of output locales, their section labels,
//! month abbreviations and the proficiency scale.

pub mod format;
pub mod labels;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use labels::Labels;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
}

/// The locale the record is authored in. Localizing to it is the identity.
pub const BASE_LOCALE: Locale = Locale::PtBr;

#[derive(Debug, Error)]
#[error("unsupported locale '{0}' (expected one of: pt-BR, en-US)")]
pub struct UnknownLocale(pub String);

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::PtBr, Locale::EnUs];

    pub fn tag(self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::EnUs => "en-US",
        }
    }

    pub fn is_base(self) -> bool {
        self == BASE_LOCALE
    }

    pub fn labels(self) -> &'static Labels {
        labels::labels_for(self)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .into_iter()
            .find(|l| l.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLocale(s.to_string()))
    }
}
