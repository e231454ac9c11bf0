//! Native word-processor output. `builder` walks the localized record into a
//! small block model; `package` serializes that model as WordprocessingML and
//! zips it into a `.docx`.

pub mod builder;
pub mod package;

use crate::errors::RenderError;
use crate::locale::Locale;
use crate::models::resume::Resume;
use crate::render::docx::builder::build_document;

/// Builds and packages the document for one locale.
pub fn render_docx(resume: &Resume, locale: Locale) -> Result<Vec<u8>, RenderError> {
    let document = build_document(resume, locale);
    package::to_docx_bytes(&document)
}
