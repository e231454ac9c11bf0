use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::export::dispatcher::ATS_TEMPLATE;
use crate::export::OutputFormat;
use crate::locale::{Locale, BASE_LOCALE};

/// Export a JSON Resume to PDF and DOCX.
#[derive(Debug, Parser)]
#[command(name = "cv_export", version, about)]
pub struct Cli {
    /// Language for export
    #[arg(long, default_value_t = BASE_LOCALE, value_parser = parse_locale)]
    pub lang: Locale,

    /// Export every supported language
    #[arg(long)]
    pub all_langs: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatChoice::All)]
    pub format: FormatChoice,

    /// Path to the CV JSON file [env: CV_FILE]
    #[arg(long)]
    pub cv: Option<PathBuf>,

    /// Output directory [env: CV_OUTPUT_DIR]
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Page template name
    #[arg(long, default_value = ATS_TEMPLATE)]
    pub template: String,

    /// Directory holding `<template>.typ` files [env: CV_TEMPLATES_DIR]
    #[arg(long)]
    pub templates_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatChoice {
    Pdf,
    Docx,
    All,
}

impl FormatChoice {
    pub fn formats(self) -> Vec<OutputFormat> {
        match self {
            FormatChoice::Pdf => vec![OutputFormat::Pdf],
            FormatChoice::Docx => vec![OutputFormat::Docx],
            FormatChoice::All => vec![OutputFormat::Pdf, OutputFormat::Docx],
        }
    }
}

fn parse_locale(s: &str) -> Result<Locale, String> {
    s.parse().map_err(|e: crate::locale::UnknownLocale| e.to_string())
}

impl Cli {
    pub fn locales(&self) -> Vec<Locale> {
        if self.all_langs {
            Locale::ALL.to_vec()
        } else {
            vec![self.lang]
        }
    }
}
