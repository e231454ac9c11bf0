//! Field formatters shared by every renderer, so page and document output read the same.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::locale::labels::{months_for, DEFAULT_PROFICIENCY, PROFICIENCY_LEVELS};
use crate::locale::Locale;
use crate::models::resume::LanguageEntry;

/// Result of formatting a date field. `Truncated` marks input that was not a
/// valid ISO date and was shown as its first seven characters instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedDate {
    Empty,
    Formatted(String),
    Truncated(String),
}

impl FormattedDate {
    pub fn as_str(&self) -> &str {
        match self {
            FormattedDate::Empty => "",
            FormattedDate::Formatted(s) | FormattedDate::Truncated(s) => s,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl fmt::Display for FormattedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formats `YYYY-MM-DD[...]` as `Jun/2023` (pt-BR) or `Jun 2023` (en-US).
pub fn format_date(raw: Option<&str>, locale: Locale) -> FormattedDate {
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => return FormattedDate::Empty,
    };

    match NaiveDate::parse_from_str(char_prefix(raw, 10), "%Y-%m-%d") {
        Ok(date) => {
            let month = months_for(locale)[date.month0() as usize];
            let text = match locale {
                Locale::PtBr => format!("{month}/{}", date.year()),
                Locale::EnUs => format!("{month} {}", date.year()),
            };
            FormattedDate::Formatted(text)
        }
        Err(_) => FormattedDate::Truncated(char_prefix(raw, 7).to_string()),
    }
}

/// `<start> - <end>`, with the locale's "present" word when the end is missing.
pub fn format_date_range(start: Option<&str>, end: Option<&str>, locale: Locale) -> String {
    let start = format_date(start, locale);
    let end = format_date(end, locale);
    let end = if end.is_empty() {
        locale.labels().present
    } else {
        end.as_str()
    };
    format!("{start} - {end}")
}

fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProficiencySource {
    /// Exact match of the `level` code.
    Level,
    /// Case-insensitive substring match inside the `fluency` text.
    Fluency,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Proficiency {
    pub percent: u8,
    pub source: ProficiencySource,
}

pub fn resolve_proficiency(entry: &LanguageEntry) -> Proficiency {
    if let Some(level) = entry.level.as_deref() {
        if let Some((_, percent)) = PROFICIENCY_LEVELS.iter().find(|(code, _)| *code == level) {
            return Proficiency {
                percent: *percent,
                source: ProficiencySource::Level,
            };
        }
    }

    let fluency = entry.fluency.to_lowercase();
    PROFICIENCY_LEVELS
        .iter()
        .find(|(code, _)| fluency.contains(&code.to_lowercase()))
        .map(|(_, percent)| Proficiency {
            percent: *percent,
            source: ProficiencySource::Fluency,
        })
        .unwrap_or(Proficiency {
            percent: DEFAULT_PROFICIENCY,
            source: ProficiencySource::Default,
        })
}
