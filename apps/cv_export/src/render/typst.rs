//! Page renderer that compiles a Typst template against `context.json`.
//!
//! Each render runs in its own scratch directory: the template is copied in as
//! `main.typ`, the serialized context beside it, and `typst compile` writes
//! `out.pdf`, which is read back and returned.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use bytes::Bytes;
use tracing::debug;

use crate::errors::RenderError;
use crate::export::context::RenderContext;
use crate::render::PageRenderer;

const ATS_TEMPLATE: &str = include_str!("../../templates/ats.typ");

/// Templates compiled into the binary, used when the templates directory lacks them.
fn builtin_template(name: &str) -> Option<&'static str> {
    match name {
        "ats" => Some(ATS_TEMPLATE),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct TypstRenderer {
    binary: PathBuf,
    templates_dir: PathBuf,
    version: String,
}

impl TypstRenderer {
    /// Runs `<binary> --version`. Returns `Unavailable` if it cannot be executed.
    pub fn detect(binary: impl Into<PathBuf>, templates_dir: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let binary = binary.into();
        let output = Command::new(&binary)
            .arg("--version")
            .output()
            .map_err(|e| RenderError::Unavailable(format!("{} ({e})", binary.display())))?;

        if !output.status.success() {
            return Err(RenderError::Unavailable(binary.display().to_string()));
        }

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Self {
            binary,
            templates_dir: templates_dir.into(),
            version,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn install_template(&self, template: &str, dest: &Path) -> Result<(), RenderError> {
        let on_disk = self.templates_dir.join(format!("{template}.typ"));
        if on_disk.is_file() {
            fs::copy(&on_disk, dest)?;
            return Ok(());
        }
        match builtin_template(template) {
            Some(source) => {
                debug!("Using built-in '{template}' template");
                fs::write(dest, source)?;
                Ok(())
            }
            None => Err(RenderError::TemplateNotFound(on_disk)),
        }
    }
}

impl PageRenderer for TypstRenderer {
    fn name(&self) -> &str {
        "typst"
    }

    fn render(&self, template: &str, context: &RenderContext<'_>) -> Result<Bytes, RenderError> {
        let scratch = tempfile::tempdir()?;
        self.install_template(template, &scratch.path().join("main.typ"))?;
        fs::write(
            scratch.path().join("context.json"),
            serde_json::to_vec(context)?,
        )?;

        let output = Command::new(&self.binary)
            .arg("compile")
            .arg("main.typ")
            .arg("out.pdf")
            .current_dir(scratch.path())
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::Compiler(stderr.trim().to_string()));
        }

        let pdf = fs::read(scratch.path().join("out.pdf"))?;
        Ok(Bytes::from(pdf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer(templates_dir: &Path) -> TypstRenderer {
        TypstRenderer {
            binary: PathBuf::from("typst"),
            templates_dir: templates_dir.to_path_buf(),
            version: String::new(),
        }
    }

    #[test]
    fn test_detect_missing_binary_is_unavailable() {
        let err = TypstRenderer::detect("/nonexistent/typst-binary", "templates").unwrap_err();
        assert!(matches!(err, RenderError::Unavailable(_)));
    }

    #[test]
    fn test_builtin_ats_template_reads_context() {
        let source = builtin_template("ats").unwrap();
        assert!(source.contains("context.json"));
        assert!(builtin_template("modern").is_none());
    }

    #[test]
    fn test_builtin_template_uses_every_heading_label() {
        let labels = serde_json::to_value(crate::locale::labels::labels_for(
            crate::locale::Locale::EnUs,
        ))
        .unwrap();
        for key in labels.as_object().unwrap().keys() {
            if key == "present" {
                continue;
            }
            assert!(ATS_TEMPLATE.contains(&format!("labels.{key}")), "{key}");
        }
    }

    #[test]
    fn test_template_on_disk_takes_precedence() {
        let templates = tempfile::tempdir().unwrap();
        fs::write(templates.path().join("ats.typ"), "custom").unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let dest = scratch.path().join("main.typ");
        renderer(templates.path()).install_template("ats", &dest).unwrap();
        assert_eq!(fs::read_to_string(dest).unwrap(), "custom");
    }

    #[test]
    fn test_falls_back_to_builtin_template() {
        let templates = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let dest = scratch.path().join("main.typ");
        renderer(templates.path()).install_template("ats", &dest).unwrap();
        assert_eq!(fs::read_to_string(dest).unwrap(), ATS_TEMPLATE);
    }

    #[test]
    fn test_unknown_template_is_reported() {
        let templates = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let err = renderer(templates.path())
            .install_template("fancy", &scratch.path().join("main.typ"))
            .unwrap_err();
        assert!(matches!(err, RenderError::TemplateNotFound(p) if p.ends_with("fancy.typ")));
    }
}
