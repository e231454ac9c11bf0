use serde::Serialize;

use crate::locale::Locale;

/// Section headings and fixed words for one locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Labels {
    pub summary: &'static str,
    pub experience: &'static str,
    pub education: &'static str,
    pub skills: &'static str,
    pub languages: &'static str,
    pub certifications: &'static str,
    pub awards: &'static str,
    pub publications: &'static str,
    /// Shown in place of a missing end date.
    pub present: &'static str,
}

const PT_BR: Labels = Labels {
    summary: "Resumo Profissional",
    experience: "Experiência Profissional",
    education: "Formação Acadêmica",
    skills: "Competências",
    languages: "Idiomas",
    certifications: "Certificações",
    awards: "Premiações",
    publications: "Publicações",
    present: "Atual",
};

const EN_US: Labels = Labels {
    summary: "Professional Summary",
    experience: "Professional Experience",
    education: "Education",
    skills: "Skills",
    languages: "Languages",
    certifications: "Certifications",
    awards: "Awards",
    publications: "Publications",
    present: "Present",
};

pub(crate) const MONTHS_PT_BR: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

pub(crate) const MONTHS_EN_US: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Proficiency code → percentage. Order matters: fluency text is matched
/// against these keys top to bottom.
pub(crate) const PROFICIENCY_LEVELS: &[(&str, u8)] = &[
    ("Native", 100),
    ("C2", 100),
    ("C1", 90),
    ("Fluent", 85),
    ("Advanced", 80),
    ("B2", 75),
    ("B1", 60),
    ("Intermediate", 55),
    ("A2", 40),
    ("Basic", 35),
    ("A1", 25),
    ("Elementary", 20),
];

pub(crate) const DEFAULT_PROFICIENCY: u8 = 50;

pub fn labels_for(locale: Locale) -> &'static Labels {
    match locale {
        Locale::PtBr => &PT_BR,
        Locale::EnUs => &EN_US,
    }
}

pub(crate) fn months_for(locale: Locale) -> &'static [&'static str; 12] {
    match locale {
        Locale::PtBr => &MONTHS_PT_BR,
        Locale::EnUs => &MONTHS_EN_US,
    }
}
