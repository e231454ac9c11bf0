// Renderers. Both consume the same localized record and formatter output, so a
// PDF and a DOCX produced from one locale carry the same text.
//
// - `typst`: page renderer backed by an external compiler process.
// - `docx`: in-process document builder, always available.

pub mod docx;
pub mod typst;

use bytes::Bytes;

use crate::errors::RenderError;
use crate::export::context::RenderContext;

/// A template-driven renderer that produces page-formatted bytes (PDF).
///
/// The dispatcher holds it as `Option<&dyn PageRenderer>`; `None` means the
/// backend was not found at startup and the page format is skipped.
pub trait PageRenderer: Send + Sync {
    fn name(&self) -> &str;

    fn render(&self, template: &str, context: &RenderContext<'_>) -> Result<Bytes, RenderError>;
}
