use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::Cli;

/// Runtime configuration: environment (and `.env`) first, CLI flags on top.
#[derive(Debug, Clone)]
pub struct Config {
    pub cv_file: PathBuf,
    pub output_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub typst_bin: PathBuf,
    pub filename_prefix: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            cv_file: env_or("CV_FILE", "cv.json").into(),
            output_dir: env_or("CV_OUTPUT_DIR", "output").into(),
            templates_dir: env_or("CV_TEMPLATES_DIR", "templates").into(),
            typst_bin: env_or("TYPST_BIN", "typst").into(),
            filename_prefix: non_empty(env_or("CV_FILENAME_PREFIX", "CV"))
                .context("CV_FILENAME_PREFIX must not be empty")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(cv) = &cli.cv {
            self.cv_file = cv.clone();
        }
        if let Some(output) = &cli.output {
            self.output_dir = output.clone();
        }
        if let Some(templates) = &cli.templates_dir {
            self.templates_dir = templates.clone();
        }
        self
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
