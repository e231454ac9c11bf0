//! WordprocessingML serialization and `.docx` packaging.

use std::io::{Cursor, Seek, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::errors::RenderError;
use crate::render::docx::builder::{Block, Document, Run};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
<Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
</Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>
</Relationships>"#;

// Normal 11pt Calibri; CVTitle 22pt and SectionHeader 13pt, both bold #2C3E50.
const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr></w:rPrDefault></w:docDefaults>
<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:pPr><w:spacing w:after="60"/></w:pPr></w:style>
<w:style w:type="paragraph" w:customStyle="1" w:styleId="CVTitle"><w:name w:val="CVTitle"/><w:basedOn w:val="Normal"/><w:rPr><w:b/><w:color w:val="2C3E50"/><w:sz w:val="44"/></w:rPr></w:style>
<w:style w:type="paragraph" w:customStyle="1" w:styleId="SectionHeader"><w:name w:val="SectionHeader"/><w:basedOn w:val="Normal"/><w:pPr><w:keepNext/></w:pPr><w:rPr><w:b/><w:color w:val="2C3E50"/><w:sz w:val="26"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/><w:pPr><w:numPr><w:numId w:val="1"/></w:numPr><w:ind w:left="360" w:hanging="360"/></w:pPr></w:style>
</w:styles>"#;

const NUMBERING: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:abstractNum w:abstractNumId="0"><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="360" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum>
<w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
</w:numbering>"#;

/// Paragraph-level formatting derived from the block kind.
struct ParagraphFormat {
    style: Option<&'static str>,
    centered: bool,
    /// Half-points.
    size: Option<u32>,
    color: Option<&'static str>,
}

impl ParagraphFormat {
    fn of(block: &Block) -> Self {
        let plain = ParagraphFormat {
            style: None,
            centered: false,
            size: None,
            color: None,
        };
        match block {
            Block::Title(_) => ParagraphFormat {
                style: Some("CVTitle"),
                centered: true,
                ..plain
            },
            Block::Subtitle(_) => ParagraphFormat {
                centered: true,
                size: Some(24),
                color: Some("34495E"),
                ..plain
            },
            Block::Contact(_) => ParagraphFormat {
                centered: true,
                size: Some(20),
                color: Some("555555"),
                ..plain
            },
            Block::SectionHeading(_) => ParagraphFormat {
                style: Some("SectionHeader"),
                ..plain
            },
            Block::Bullet(_) => ParagraphFormat {
                style: Some("ListBullet"),
                ..plain
            },
            Block::Paragraph(_) | Block::Spacer => plain,
        }
    }
}

struct DocumentXml {
    writer: Writer<Vec<u8>>,
}

impl DocumentXml {
    fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), RenderError> {
        self.writer
            .write_event(event)
            .map_err(|e| RenderError::Xml(e.to_string()))
    }

    fn start(&mut self, name: &str) -> Result<(), RenderError> {
        self.event(Event::Start(BytesStart::new(name)))
    }

    fn end(&mut self, name: &str) -> Result<(), RenderError> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, name: &str, val: Option<&str>) -> Result<(), RenderError> {
        let mut elem = BytesStart::new(name);
        if let Some(val) = val {
            elem.push_attribute(("w:val", val));
        }
        self.event(Event::Empty(elem))
    }

    fn document(mut self, doc: &Document) -> Result<Vec<u8>, RenderError> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        let mut root = BytesStart::new("w:document");
        root.push_attribute(("xmlns:w", W_NS));
        self.event(Event::Start(root))?;
        self.start("w:body")?;

        for block in &doc.blocks {
            self.paragraph(block)?;
        }

        // A4, 2cm margins.
        self.start("w:sectPr")?;
        let mut size = BytesStart::new("w:pgSz");
        size.push_attribute(("w:w", "11906"));
        size.push_attribute(("w:h", "16838"));
        self.event(Event::Empty(size))?;
        let mut margins = BytesStart::new("w:pgMar");
        for side in ["w:top", "w:right", "w:bottom", "w:left"] {
            margins.push_attribute((side, "1134"));
        }
        self.event(Event::Empty(margins))?;
        self.end("w:sectPr")?;

        self.end("w:body")?;
        self.end("w:document")?;
        Ok(self.writer.into_inner())
    }

    fn paragraph(&mut self, block: &Block) -> Result<(), RenderError> {
        let format = ParagraphFormat::of(block);
        self.start("w:p")?;

        if format.style.is_some() || format.centered {
            self.start("w:pPr")?;
            if let Some(style) = format.style {
                self.empty("w:pStyle", Some(style))?;
            }
            if format.centered {
                self.empty("w:jc", Some("center"))?;
            }
            self.end("w:pPr")?;
        }

        match block {
            Block::Paragraph(runs) => {
                for run in runs {
                    self.run(run, &format)?;
                }
            }
            Block::Spacer => {}
            other => self.run(&Run::plain(other.plain_text()), &format)?,
        }

        self.end("w:p")
    }

    fn run(&mut self, run: &Run, format: &ParagraphFormat) -> Result<(), RenderError> {
        if run.text.is_empty() {
            return Ok(());
        }
        self.start("w:r")?;

        let styled = run.bold || run.italic || format.size.is_some() || format.color.is_some();
        if styled {
            // rPr children must follow schema order: b, i, color, sz.
            self.start("w:rPr")?;
            if run.bold {
                self.empty("w:b", None)?;
            }
            if run.italic {
                self.empty("w:i", None)?;
            }
            if let Some(color) = format.color {
                self.empty("w:color", Some(color))?;
            }
            if let Some(size) = format.size {
                self.empty("w:sz", Some(size.to_string().as_str()))?;
            }
            self.end("w:rPr")?;
        }

        let mut text = BytesStart::new("w:t");
        text.push_attribute(("xml:space", "preserve"));
        self.event(Event::Start(text))?;
        self.event(Event::Text(BytesText::new(&run.text)))?;
        self.end("w:t")?;

        self.end("w:r")
    }
}

/// Serializes `docProps/core.xml` carrying the document title.
pub fn core_properties_xml(title: &str) -> Result<Vec<u8>, RenderError> {
    let mut out = DocumentXml::new();
    out.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    let mut root = BytesStart::new("cp:coreProperties");
    root.push_attribute((
        "xmlns:cp",
        "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
    ));
    root.push_attribute(("xmlns:dc", "http://purl.org/dc/elements/1.1/"));
    out.event(Event::Start(root))?;
    for element in ["dc:title", "dc:creator"] {
        out.start(element)?;
        out.event(Event::Text(BytesText::new(title)))?;
        out.end(element)?;
    }
    out.end("cp:coreProperties")?;
    Ok(out.writer.into_inner())
}

/// Serializes `word/document.xml`.
pub fn document_xml(doc: &Document) -> Result<Vec<u8>, RenderError> {
    DocumentXml::new().document(doc)
}

/// Writes a complete `.docx` package into `sink`.
pub fn write_docx<W: Write + Seek>(doc: &Document, sink: W) -> Result<W, RenderError> {
    let body = document_xml(doc)?;
    let core = core_properties_xml(&doc.title)?;
    let mut zip = ZipWriter::new(sink);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, &[u8]); 7] = [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", ROOT_RELS.as_bytes()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes()),
        ("word/styles.xml", STYLES.as_bytes()),
        ("word/numbering.xml", NUMBERING.as_bytes()),
        ("word/document.xml", &body),
        ("docProps/core.xml", &core),
    ];
    for (name, contents) in parts {
        zip.start_file(name, options)?;
        zip.write_all(contents)?;
    }

    Ok(zip.finish()?)
}

pub fn to_docx_bytes(doc: &Document) -> Result<Vec<u8>, RenderError> {
    Ok(write_docx(doc, Cursor::new(Vec::new()))?.into_inner())
}
