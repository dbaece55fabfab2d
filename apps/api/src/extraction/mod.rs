//! Text extraction — turns an uploaded office document into plain text.
//!
//! Format parsing is delegated to `pdf-extract` (PDF) and to `zip` + `quick-xml`
//! for the OOXML containers (Word, PowerPoint). Unknown media types and empty
//! payloads extract to an empty string; only a corrupt container is an error.

use std::io::{Cursor, Read, Seek};

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

pub mod docx;
pub mod pdf;
pub mod pptx;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("ZIP container error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parsing error in {part}: {message}")]
    Xml { part: String, message: String },

    #[error("PDF extraction error: {0}")]
    Pdf(String),

    #[error("Document part not found: {0}")]
    MissingPart(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Declared format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Pdf,
    WordDocument,
    Presentation,
    Unknown,
}

impl MediaType {
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            PDF_MIME => Self::Pdf,
            DOCX_MIME => Self::WordDocument,
            PPTX_MIME => Self::Presentation,
            _ => Self::Unknown,
        }
    }

    pub fn from_filename(filename: &str) -> Self {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdf") => Self::Pdf,
            Some("docx") => Self::WordDocument,
            Some("pptx") => Self::Presentation,
            _ => Self::Unknown,
        }
    }

    /// Resolves the media type of an upload. The declared MIME type wins;
    /// the filename extension is only consulted when the MIME type is
    /// missing or unrecognized.
    pub fn resolve(mime: Option<&str>, filename: Option<&str>) -> Self {
        match mime.map(Self::from_mime) {
            Some(known) if known != Self::Unknown => known,
            _ => filename.map(Self::from_filename).unwrap_or(Self::Unknown),
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf => PDF_MIME,
            Self::WordDocument => DOCX_MIME,
            Self::Presentation => PPTX_MIME,
            Self::Unknown => "application/octet-stream",
        }
    }
}

/// An uploaded document. Consumed once by `extract`.
#[derive(Debug, Clone)]
pub struct Document {
    pub filename: Option<String>,
    pub media_type: MediaType,
    pub bytes: Bytes,
}

impl Document {
    pub fn new(filename: Option<String>, media_type: MediaType, bytes: Bytes) -> Self {
        Self {
            filename,
            media_type,
            bytes,
        }
    }

    /// Name used in logs and error messages.
    pub fn display_name(&self) -> &str {
        self.filename.as_deref().unwrap_or("<unnamed>")
    }
}

/// Extracts the plain-text content of a document.
///
/// Returns `Ok("")` for empty payloads and for `MediaType::Unknown`.
pub fn extract(document: &Document) -> Result<String, ExtractionError> {
    if document.bytes.is_empty() {
        return Ok(String::new());
    }

    match document.media_type {
        MediaType::Pdf => pdf::extract_pdf(&document.bytes),
        MediaType::WordDocument => docx::extract_docx(&document.bytes),
        MediaType::Presentation => pptx::extract_pptx(&document.bytes),
        MediaType::Unknown => Ok(String::new()),
    }
}

/// Reads one XML part out of an OOXML container.
pub(crate) fn read_zip_part<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    name: &str,
) -> Result<String, ExtractionError> {
    let mut part = archive.by_name(name).map_err(|e| match e {
        zip::result::ZipError::FileNotFound => ExtractionError::MissingPart(name.to_string()),
        other => ExtractionError::Zip(other),
    })?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}

pub(crate) fn open_zip(bytes: &[u8]) -> Result<zip::ZipArchive<Cursor<&[u8]>>, ExtractionError> {
    Ok(zip::ZipArchive::new(Cursor::new(bytes))?)
}

pub(crate) fn xml_error(part: &str, err: impl std::fmt::Display) -> ExtractionError {
    ExtractionError::Xml {
        part: part.to_string(),
        message: err.to_string(),
    }
}

/// In-memory OOXML fixtures shared by the extractor tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::{Cursor, Write};

    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};
    use zip::write::SimpleFileOptions;

    pub fn zip_parts(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in parts {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{p}</w:t></w:r></w:p>"))
            .collect();
        let xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:body>{body}</w:body></w:document>"
        );
        zip_parts(&[("word/document.xml", &xml)])
    }

    pub const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

    pub const PICTURE: &str = "<p:pic><p:nvPicPr><p:cNvPr id=\"3\" name=\"Logo\"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr>\
         <p:blipFill/><p:spPr/></p:pic>";

    pub fn slide(shapes: &str) -> String {
        format!(
            "<?xml version=\"1.0\"?><p:sld {NS}><p:cSld><p:spTree>\
             <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
             <p:grpSpPr/>{shapes}</p:spTree></p:cSld></p:sld>"
        )
    }

    pub fn text_shape(paragraphs: &[&str]) -> String {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<a:p><a:r><a:rPr lang=\"en-US\"/><a:t>{p}</a:t></a:r></a:p>"))
            .collect();
        format!(
            "<p:sp><p:nvSpPr><p:cNvPr id=\"2\" name=\"Title\"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>\
             <p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{body}</p:txBody></p:sp>"
        )
    }

    /// Builds a deck whose `sldIdLst` lists the given slide files in order.
    pub fn deck(slides: &[(&str, String)]) -> Vec<u8> {
        let ids: String = slides
            .iter()
            .enumerate()
            .map(|(i, _)| format!("<p:sldId id=\"{}\" r:id=\"rId{}\"/>", 256 + i, i + 10))
            .collect();
        let rels: String = slides
            .iter()
            .enumerate()
            .map(|(i, (file, _))| {
                format!(
                    "<Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide\" Target=\"slides/{file}\"/>",
                    i + 10
                )
            })
            .collect();
        let presentation =
            format!("<?xml version=\"1.0\"?><p:presentation {NS}><p:sldIdLst>{ids}</p:sldIdLst></p:presentation>");
        let rels = format!(
            "<?xml version=\"1.0\"?><Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">{rels}</Relationships>"
        );

        let mut parts: Vec<(String, String)> = vec![
            ("ppt/presentation.xml".to_string(), presentation),
            ("ppt/_rels/presentation.xml.rels".to_string(), rels),
        ];
        for (file, xml) in slides {
            parts.push((format!("ppt/slides/{file}"), xml.clone()));
        }
        let borrowed: Vec<(&str, &str)> = parts
            .iter()
            .map(|(name, xml)| (name.as_str(), xml.as_str()))
            .collect();
        zip_parts(&borrowed)
    }

    /// One page per entry, each showing its text in Courier. An empty entry
    /// yields a page whose content stream only paints a rectangle.
    pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let operations = if text.is_empty() {
                vec![
                    Operation::new("re", vec![72.into(), 72.into(), 200.into(), 100.into()]),
                    Operation::new("f", vec![]),
                ]
            } else {
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ]
            };
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }
}
