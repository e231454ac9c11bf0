use crate::export::context::{contact_line, DisplayStrings};
use crate::locale::Locale;
use crate::models::resume::Resume;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::plain(text)
        }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            italic: true,
            ..Self::plain(text)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Title(String),
    Subtitle(String),
    Contact(String),
    SectionHeading(String),
    Paragraph(Vec<Run>),
    Bullet(String),
    Spacer,
}

impl Block {
    fn text(text: impl Into<String>) -> Self {
        Block::Paragraph(vec![Run::plain(text)])
    }

    /// Concatenated run text, for comparisons that ignore styling.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Title(t)
            | Block::Subtitle(t)
            | Block::Contact(t)
            | Block::SectionHeading(t)
            | Block::Bullet(t) => t.clone(),
            Block::Paragraph(runs) => runs.iter().map(|r| r.text.as_str()).collect(),
            Block::Spacer => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Document {
    fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn headings(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::SectionHeading(h) => Some(h.as_str()),
                _ => None,
            })
            .collect()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Lays out the record in the same order as the page template: header, summary,
/// experience, education, skills, languages, then certificates, awards and
/// publications when present.
pub fn build_document(resume: &Resume, locale: Locale) -> Document {
    let labels = locale.labels();
    let display = DisplayStrings::build(resume, locale);
    let basics = &resume.basics;

    let mut doc = Document {
        title: basics.name.clone(),
        blocks: Vec::new(),
    };

    doc.push(Block::Title(basics.name.clone()));
    doc.push(Block::Subtitle(basics.label.clone()));
    doc.push(Block::Contact(contact_line(basics)));
    doc.push(Block::Spacer);

    doc.push(Block::SectionHeading(labels.summary.to_string()));
    doc.push(Block::text(basics.summary.clone()));
    doc.push(Block::Spacer);

    doc.push(Block::SectionHeading(labels.experience.to_string()));
    for (job, dates) in resume.work.iter().zip(&display.work_dates) {
        doc.push(Block::Paragraph(vec![
            Run::bold(job.position.clone()),
            Run::plain(format!(" | {dates}")),
        ]));

        let mut org = vec![Run::italic(job.name.clone())];
        if let Some(location) = non_blank(job.location.as_deref()) {
            org.push(Run::plain(format!(" | {location}")));
        }
        doc.push(Block::Paragraph(org));

        if let Some(summary) = non_blank(job.summary.as_deref()) {
            doc.push(Block::text(summary));
        }
        for highlight in &job.highlights {
            doc.push(Block::Bullet(highlight.clone()));
        }
        doc.push(Block::Spacer);
    }

    doc.push(Block::SectionHeading(labels.education.to_string()));
    for (edu, dates) in resume.education.iter().zip(&display.education_dates) {
        doc.push(Block::Paragraph(vec![Run::bold(format!(
            "{} - {}",
            edu.study_type, edu.area
        ))]));
        doc.push(Block::Paragraph(vec![
            Run::italic(edu.institution.clone()),
            Run::plain(format!(" | {dates}")),
        ]));
        doc.push(Block::Spacer);
    }

    doc.push(Block::SectionHeading(labels.skills.to_string()));
    for skill in &resume.skills {
        doc.push(Block::Paragraph(vec![
            Run::bold(format!("{}: ", skill.name)),
            Run::plain(skill.keywords.join(", ")),
        ]));
    }
    doc.push(Block::Spacer);

    doc.push(Block::SectionHeading(labels.languages.to_string()));
    for item in &resume.languages {
        let level = non_blank(item.level.as_deref())
            .map(|l| format!(" ({l})"))
            .unwrap_or_default();
        doc.push(Block::text(format!("{}: {}{level}", item.language, item.fluency)));
    }
    doc.push(Block::Spacer);

    if !resume.certificates.is_empty() {
        doc.push(Block::SectionHeading(labels.certifications.to_string()));
        for (cert, date) in resume.certificates.iter().zip(&display.certificate_dates) {
            let status = non_blank(cert.status.as_deref())
                .map(|s| format!(" [{s}]"))
                .unwrap_or_default();
            doc.push(Block::text(format!(
                "{} - {} ({date}){status}",
                cert.name, cert.issuer
            )));
        }
        doc.push(Block::Spacer);
    }

    if !resume.awards.is_empty() {
        doc.push(Block::SectionHeading(labels.awards.to_string()));
        for (award, date) in resume.awards.iter().zip(&display.award_dates) {
            doc.push(Block::Paragraph(vec![
                Run::bold(award.title.clone()),
                Run::plain(format!(" - {} ({date})", award.awarder)),
            ]));
            if let Some(summary) = non_blank(award.summary.as_deref()) {
                doc.push(Block::text(summary));
            }
        }
        doc.push(Block::Spacer);
    }

    if !resume.publications.is_empty() {
        doc.push(Block::SectionHeading(labels.publications.to_string()));
        for (publication, date) in resume.publications.iter().zip(&display.publication_dates) {
            doc.push(Block::Paragraph(vec![Run::bold(publication.name.clone())]));
            doc.push(Block::text(format!("{}, {date}", publication.publisher)));
        }
    }

    doc
}
