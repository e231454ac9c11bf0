//! Render dispatcher — runs every requested locale × format unit and reports
//! each one. A failing unit is logged and recorded; the remaining units still run.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::errors::ExportError;
use crate::export::context::RenderContext;
use crate::export::keywords::extract_ats_keywords;
use crate::export::naming::{create_unique, output_base_name};
use crate::locale::Locale;
use crate::localization::{localize, LocalizationOutcome, Localized};
use crate::models::resume::Resume;
use crate::render::docx::render_docx;
use crate::render::PageRenderer;

/// Only this template consumes the ATS keyword list.
pub const ATS_TEMPLATE: &str = "ats";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Docx,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Docx => "docx",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone)]
pub struct ExportJob {
    pub locales: Vec<Locale>,
    pub formats: Vec<OutputFormat>,
    pub template: String,
}

#[derive(Debug)]
pub enum UnitStatus {
    Written(PathBuf),
    /// The backend for this format is not available.
    Skipped,
    Failed(ExportError),
}

#[derive(Debug)]
pub struct UnitReport {
    pub locale: Locale,
    pub format: OutputFormat,
    pub localization: LocalizationOutcome,
    pub status: UnitStatus,
}

#[derive(Debug, Default)]
pub struct ExportReport {
    pub units: Vec<UnitReport>,
}

impl ExportReport {
    pub fn written(&self) -> Vec<&Path> {
        self.units
            .iter()
            .filter_map(|u| match &u.status {
                UnitStatus::Written(path) => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }

    pub fn failed_count(&self) -> usize {
        self.units
            .iter()
            .filter(|u| matches!(u.status, UnitStatus::Failed(_)))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.units
            .iter()
            .filter(|u| matches!(u.status, UnitStatus::Skipped))
            .count()
    }

    /// True when units were attempted and none produced a file.
    pub fn nothing_written(&self) -> bool {
        !self.units.is_empty() && self.written().is_empty()
    }
}

pub struct Exporter<'r> {
    page_renderer: Option<&'r dyn PageRenderer>,
    output_dir: PathBuf,
    filename_prefix: String,
    generation_date: NaiveDate,
}

impl<'r> Exporter<'r> {
    pub fn new(
        page_renderer: Option<&'r dyn PageRenderer>,
        output_dir: impl Into<PathBuf>,
        filename_prefix: impl Into<String>,
        generation_date: NaiveDate,
    ) -> Self {
        Self {
            page_renderer,
            output_dir: output_dir.into(),
            filename_prefix: filename_prefix.into(),
            generation_date,
        }
    }

    pub fn run(&self, resume: &Resume, job: &ExportJob) -> ExportReport {
        let mut report = ExportReport::default();
        let short_name = resume.short_name();

        if self.page_renderer.is_none() && job.formats.contains(&OutputFormat::Pdf) {
            warn!("No page renderer available; skipping PDF for all locales");
        }

        for &locale in &job.locales {
            let localized = localize(resume, &resume.i18n, locale);
            match localized.outcome {
                LocalizationOutcome::BaseLocale => info!("[{locale}] base locale"),
                LocalizationOutcome::MissingOverlay => {
                    warn!("[{locale}] no translations found; using base content")
                }
                LocalizationOutcome::Applied {
                    matched,
                    unmatched,
                    duplicated,
                } => info!(
                    "[{locale}] applied {matched} entry overrides ({unmatched} unmatched ignored, {duplicated} duplicate ids)"
                ),
            }

            let base_name = output_base_name(
                &self.filename_prefix,
                &short_name,
                self.generation_date,
                locale.tag(),
            );

            for &format in &job.formats {
                let status = match self.render_unit(&localized, format, &job.template) {
                    Ok(None) => UnitStatus::Skipped,
                    Ok(Some(bytes)) => match self.write_output(&base_name, format, &bytes) {
                        Ok(path) => {
                            info!("[{locale}] Created: {}", path.display());
                            UnitStatus::Written(path)
                        }
                        Err(e) => {
                            error!("[{locale}] {format} export failed: {e}");
                            UnitStatus::Failed(e)
                        }
                    },
                    Err(e) => {
                        error!("[{locale}] {format} export failed: {e}");
                        UnitStatus::Failed(e)
                    }
                };

                report.units.push(UnitReport {
                    locale,
                    format,
                    localization: localized.outcome,
                    status,
                });
            }
        }

        report
    }

    /// Returns `Ok(None)` when the format's backend is unavailable.
    fn render_unit(
        &self,
        localized: &Localized<'_>,
        format: OutputFormat,
        template: &str,
    ) -> Result<Option<Vec<u8>>, ExportError> {
        match format {
            OutputFormat::Pdf => {
                let Some(renderer) = self.page_renderer else {
                    return Ok(None);
                };
                let keywords =
                    (template == ATS_TEMPLATE).then(|| extract_ats_keywords(localized.resume()));
                let context = RenderContext::new(localized.resume(), localized.locale, keywords);
                let pdf = renderer.render(template, &context)?;
                Ok(Some(pdf.to_vec()))
            }
            OutputFormat::Docx => Ok(Some(render_docx(localized.resume(), localized.locale)?)),
        }
    }

    fn write_output(
        &self,
        base_name: &str,
        format: OutputFormat,
        bytes: &[u8],
    ) -> Result<PathBuf, ExportError> {
        let (path, mut file) = create_unique(base_name, format.extension(), &self.output_dir)
            .map_err(|source| ExportError::Reserve {
                dir: self.output_dir.clone(),
                source,
            })?;

        if let Err(source) = file.write_all(bytes).and_then(|_| file.sync_all()) {
            drop(file);
            // Don't leave a truncated artifact that later runs would number around.
            let _ = std::fs::remove_file(&path);
            return Err(ExportError::Write { path, source });
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RenderError;
    use bytes::Bytes;
    use serde_json::json;
    use std::sync::Mutex;

    struct FakePdf {
        seen_keywords: Mutex<Vec<Option<Vec<String>>>>,
        fail_for: Option<Locale>,
    }

    impl FakePdf {
        fn new(fail_for: Option<Locale>) -> Self {
            Self {
                seen_keywords: Mutex::new(Vec::new()),
                fail_for,
            }
        }
    }

    impl PageRenderer for FakePdf {
        fn name(&self) -> &str {
            "fake"
        }

        fn render(&self, _template: &str, context: &RenderContext<'_>) -> Result<Bytes, RenderError> {
            self.seen_keywords
                .lock()
                .unwrap()
                .push(context.ats_keywords.clone());
            if Some(context.lang) == self.fail_for {
                return Err(RenderError::Compiler("boom".to_string()));
            }
            Ok(Bytes::from(format!("%PDF {}", context.resume.work[0].position)))
        }
    }

    fn resume() -> Resume {
        serde_json::from_value(json!({
            "basics": { "name": "Ana Maria Souza" },
            "work": [{ "id": "job1", "name": "Acme", "position": "Engenheira", "keywords": ["Rust"] }],
            "x-i18n": { "en-US": { "work": { "job1": { "position": "Engineer" } } } }
        }))
        .unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 22).unwrap()
    }

    fn job(formats: Vec<OutputFormat>) -> ExportJob {
        ExportJob {
            locales: vec![Locale::PtBr, Locale::EnUs],
            formats,
            template: ATS_TEMPLATE.to_string(),
        }
    }

    #[test]
    fn test_writes_every_unit_with_expected_names() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = FakePdf::new(None);
        let exporter = Exporter::new(Some(&pdf as &dyn PageRenderer), dir.path(), "CV", date());
        let report = exporter.run(&resume(), &job(vec![OutputFormat::Pdf, OutputFormat::Docx]));

        assert_eq!(report.units.len(), 4);
        assert_eq!(report.failed_count(), 0);
        let names: Vec<String> = report
            .written()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "CV - Ana Souza (2026-01-22) - pt-BR.pdf",
                "CV - Ana Souza (2026-01-22) - pt-BR.docx",
                "CV - Ana Souza (2026-01-22) - en-US.pdf",
                "CV - Ana Souza (2026-01-22) - en-US.docx",
            ]
        );
        let en_pdf = std::fs::read(dir.path().join("CV - Ana Souza (2026-01-22) - en-US.pdf")).unwrap();
        assert_eq!(en_pdf, b"%PDF Engineer");
    }

    #[test]
    fn test_second_run_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(None, dir.path(), "CV", date());
        let docx_only = ExportJob {
            locales: vec![Locale::PtBr],
            formats: vec![OutputFormat::Docx],
            template: ATS_TEMPLATE.to_string(),
        };
        exporter.run(&resume(), &docx_only);
        let second = exporter.run(&resume(), &docx_only);
        assert_eq!(
            second.written()[0].file_name().unwrap().to_string_lossy(),
            "CV - Ana Souza (2026-01-22) - pt-BR (1).docx"
        );
    }

    #[test]
    fn test_failure_in_one_unit_does_not_stop_others() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = FakePdf::new(Some(Locale::PtBr));
        let exporter = Exporter::new(Some(&pdf as &dyn PageRenderer), dir.path(), "CV", date());
        let report = exporter.run(&resume(), &job(vec![OutputFormat::Pdf, OutputFormat::Docx]));

        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.written().len(), 3);
        let failed = report
            .units
            .iter()
            .find(|u| matches!(u.status, UnitStatus::Failed(_)))
            .unwrap();
        assert_eq!((failed.locale, failed.format), (Locale::PtBr, OutputFormat::Pdf));
        assert!(!dir.path().join("CV - Ana Souza (2026-01-22) - pt-BR.pdf").exists());
    }

    #[test]
    fn test_missing_page_renderer_skips_pdf_only() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(None, dir.path(), "CV", date());
        let report = exporter.run(&resume(), &job(vec![OutputFormat::Pdf, OutputFormat::Docx]));
        assert_eq!(report.skipped_count(), 2);
        assert_eq!(report.written().len(), 2);
        assert!(report.written().iter().all(|p| p.extension().unwrap() == "docx"));
        assert!(!report.nothing_written());
    }

    #[test]
    fn test_keywords_only_for_ats_template() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = FakePdf::new(None);
        let exporter = Exporter::new(Some(&pdf as &dyn PageRenderer), dir.path(), "CV", date());
        let mut j = job(vec![OutputFormat::Pdf]);
        exporter.run(&resume(), &j);
        j.template = "classic".to_string();
        exporter.run(&resume(), &j);

        let seen = pdf.seen_keywords.lock().unwrap();
        assert_eq!(seen[0], Some(vec!["Rust".to_string()]));
        assert_eq!(seen[2], None);
    }

    #[test]
    fn test_localization_outcome_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(None, dir.path(), "CV", date());
        let report = exporter.run(&resume(), &job(vec![OutputFormat::Docx]));
        assert_eq!(report.units[0].localization, LocalizationOutcome::BaseLocale);
        assert_eq!(
            report.units[1].localization,
            LocalizationOutcome::Applied {
                matched: 1,
                unmatched: 0,
                duplicated: 0
            }
        );
    }

    #[test]
    fn test_unwritable_output_dir_fails_units() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does/not/exist");
        let exporter = Exporter::new(None, &missing, "CV", date());
        let report = exporter.run(&resume(), &job(vec![OutputFormat::Docx]));
        assert_eq!(report.failed_count(), 2);
        assert!(report.nothing_written());
    }
}
