//! The renderer-facing bundle: locale, labels, optional ATS keywords, the
//! localized record, and a `display` block of pre-formatted strings shared
//! with the document builder.

use serde::Serialize;
use tracing::debug;

use crate::locale::format::{format_date, format_date_range, resolve_proficiency, ProficiencySource};
use crate::locale::{Labels, Locale};
use crate::models::resume::{Basics, Resume};

#[derive(Debug, Clone, Serialize)]
pub struct RenderContext<'a> {
    pub lang: Locale,
    pub labels: &'static Labels,
    pub ats_keywords: Option<Vec<String>>,
    pub resume: &'a Resume,
    pub display: DisplayStrings,
}

/// Formatted values indexed in parallel with the record's lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayStrings {
    pub contact_line: String,
    pub work_dates: Vec<String>,
    pub education_dates: Vec<String>,
    pub certificate_dates: Vec<String>,
    pub award_dates: Vec<String>,
    pub publication_dates: Vec<String>,
    pub language_percent: Vec<u8>,
}

impl<'a> RenderContext<'a> {
    pub fn new(resume: &'a Resume, locale: Locale, ats_keywords: Option<Vec<String>>) -> Self {
        Self {
            lang: locale,
            labels: locale.labels(),
            ats_keywords,
            resume,
            display: DisplayStrings::build(resume, locale),
        }
    }
}

impl DisplayStrings {
    pub fn build(resume: &Resume, locale: Locale) -> Self {
        let date = |d: &Option<String>| format_date(d.as_deref(), locale).to_string();
        Self {
            contact_line: contact_line(&resume.basics),
            work_dates: resume
                .work
                .iter()
                .map(|w| format_date_range(w.start_date.as_deref(), w.end_date.as_deref(), locale))
                .collect(),
            education_dates: resume
                .education
                .iter()
                .map(|e| format_date_range(e.start_date.as_deref(), e.end_date.as_deref(), locale))
                .collect(),
            certificate_dates: resume.certificates.iter().map(|c| date(&c.date)).collect(),
            award_dates: resume.awards.iter().map(|a| date(&a.date)).collect(),
            publication_dates: resume
                .publications
                .iter()
                .map(|p| date(&p.release_date))
                .collect(),
            language_percent: resume
                .languages
                .iter()
                .map(|l| {
                    let proficiency = resolve_proficiency(l);
                    if proficiency.source == ProficiencySource::Default {
                        debug!("No proficiency match for '{}'; using default", l.language);
                    }
                    proficiency.percent
                })
                .collect(),
        }
    }
}

pub const CONTACT_SEPARATOR: &str = " | ";

/// email | phone | city, region | url | profile urls — blanks dropped.
pub fn contact_line(basics: &Basics) -> String {
    let place = match (basics.location.city.trim(), basics.location.region.trim()) {
        ("", "") => String::new(),
        (city, "") => city.to_string(),
        ("", region) => region.to_string(),
        (city, region) => format!("{city}, {region}"),
    };

    let mut parts: Vec<&str> = vec![basics.email.as_str(), basics.phone.as_str(), place.as_str()];
    if let Some(url) = basics.url.as_deref() {
        parts.push(url);
    }
    parts.extend(basics.profiles.iter().map(|p| p.url.as_str()));

    parts
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join(CONTACT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resume() -> Resume {
        serde_json::from_value(json!({
            "basics": {
                "name": "Ana Souza",
                "email": "ana@example.com",
                "phone": "",
                "location": { "city": "São Paulo", "region": "SP" },
                "profiles": [{ "network": "GitHub", "url": "https://github.com/ana" }]
            },
            "work": [{ "id": "job1", "startDate": "2021-03-01" }],
            "languages": [{ "language": "English", "fluency": "Fluent", "level": "C1" }],
            "publications": [{ "name": "Paper", "publisher": "ACM", "releaseDate": "2020-10-01" }]
        }))
        .unwrap()
    }

    #[test]
    fn test_contact_line_skips_blanks() {
        assert_eq!(
            contact_line(&resume().basics),
            "ana@example.com | São Paulo, SP | https://github.com/ana"
        );
    }

    #[test]
    fn test_contact_line_city_only() {
        let mut basics = resume().basics;
        basics.location.region.clear();
        basics.profiles.clear();
        assert_eq!(contact_line(&basics), "ana@example.com | São Paulo");
    }

    #[test]
    fn test_display_strings_follow_locale() {
        let r = resume();
        let pt = DisplayStrings::build(&r, Locale::PtBr);
        let en = DisplayStrings::build(&r, Locale::EnUs);
        assert_eq!(pt.work_dates, vec!["Mar/2021 - Atual"]);
        assert_eq!(en.work_dates, vec!["Mar 2021 - Present"]);
        assert_eq!(en.publication_dates, vec!["Oct 2020"]);
        assert_eq!(en.language_percent, vec![90]);
    }

    #[test]
    fn test_context_serializes_record_and_keywords() {
        let r = resume();
        let ctx = RenderContext::new(&r, Locale::EnUs, Some(vec!["Rust".to_string()]));
        let value = serde_json::to_value(&ctx).unwrap();
        assert_eq!(value["lang"], "en-US");
        assert_eq!(value["labels"]["present"], "Present");
        assert_eq!(value["ats_keywords"][0], "Rust");
        assert_eq!(value["resume"]["basics"]["name"], "Ana Souza");
        assert_eq!(value["display"]["language_percent"][0], 90);
    }
}
