use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure loading the input record. Fatal: nothing can be rendered without it.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Cannot read CV file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CV file {path} is not a valid resume document: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Renderer-level error. Raised by one locale/format unit; never aborts the run.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Renderer '{0}' is not available")]
    Unavailable(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(PathBuf),

    #[error("Page compiler failed: {0}")]
    Compiler(String),

    #[error("Context serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Document XML error: {0}")]
    Xml(String),

    #[error("Document packaging error: {0}")]
    Package(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Error for a single export unit (one locale × one format).
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to reserve an output file in {dir}: {source}")]
    Reserve {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
}
