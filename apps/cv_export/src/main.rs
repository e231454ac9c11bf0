mod cli;
mod config;
mod errors;
mod export;
mod locale;
mod localization;
mod models;
mod render;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::export::{ExportJob, Exporter, UnitStatus};
use crate::models::resume::Resume;
use crate::render::typst::TypstRenderer;
use crate::render::PageRenderer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?.with_cli(&cli);

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("cv_export v{}", env!("CARGO_PKG_VERSION"));

    // A missing or malformed record is fatal before anything renders.
    info!("Loading CV from: {}", config.cv_file.display());
    let resume = Resume::load(&config.cv_file)?;

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let job = ExportJob {
        locales: cli.locales(),
        formats: cli.format.formats(),
        template: cli.template.clone(),
    };

    let typst = if job.formats.contains(&export::OutputFormat::Pdf) {
        match TypstRenderer::detect(&config.typst_bin, &config.templates_dir) {
            Ok(renderer) => {
                info!("Page renderer: {} ({})", renderer.name(), renderer.version());
                Some(renderer)
            }
            Err(e) => {
                info!("{e}. Install Typst (https://typst.app) to enable PDF export.");
                None
            }
        }
    } else {
        None
    };

    info!(
        "Exporting CV: languages={} template={} formats={}",
        job.locales
            .iter()
            .map(|l| l.tag())
            .collect::<Vec<_>>()
            .join(", "),
        job.template,
        job.formats
            .iter()
            .map(|f| f.extension())
            .collect::<Vec<_>>()
            .join(", "),
    );

    let generation_date = chrono::Local::now().date_naive();
    let exporter = Exporter::new(
        typst.as_ref().map(|t| t as &dyn PageRenderer),
        &config.output_dir,
        &config.filename_prefix,
        generation_date,
    );
    let report = exporter.run(&resume, &job);

    for unit in &report.units {
        match &unit.status {
            UnitStatus::Written(path) => info!("  {} {}: {}", unit.locale, unit.format, path.display()),
            UnitStatus::Skipped => info!("  {} {}: skipped", unit.locale, unit.format),
            UnitStatus::Failed(e) => warn!(
                "  {} {}: failed ({e}) [localization: {:?}]",
                unit.locale, unit.format, unit.localization
            ),
        }
    }

    info!(
        "Export complete: {} written, {} skipped, {} failed",
        report.written().len(),
        report.skipped_count(),
        report.failed_count()
    );
    let output_dir = std::fs::canonicalize(&config.output_dir).unwrap_or(config.output_dir.clone());
    info!("Files saved to: {}", output_dir.display());

    if report.failed_count() > 0 && report.nothing_written() {
        bail!("every export unit failed");
    }

    Ok(())
}
