//! Word (.docx) extraction. DOCX files are ZIP archives; the body lives in
//! `word/document.xml`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{open_zip, read_zip_part, xml_error, ExtractionError};

const DOCUMENT_PART: &str = "word/document.xml";

/// Joins the text of every body paragraph with `\n`, in document order.
pub fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = open_zip(bytes)?;
    let xml = read_zip_part(&mut archive, DOCUMENT_PART)?;
    let paragraphs = parse_body_paragraphs(&xml)?;

    tracing::debug!("Extracted {} DOCX paragraph(s)", paragraphs.len());
    Ok(paragraphs.join("\n"))
}

/// Top-level body paragraphs only. Paragraphs inside tables and text boxes
/// are skipped, as is everything outside a run (`w:r`).
fn parse_body_paragraphs(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut nested = 0usize; // open w:tbl / w:txbxContent elements
    let mut in_paragraph = false;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:tbl" | b"w:txbxContent" => nested += 1,
                _ if nested > 0 => {}
                b"w:p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"w:r" if in_paragraph => in_run = true,
                b"w:t" if in_run => in_text = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:tbl" | b"w:txbxContent" => nested = nested.saturating_sub(1),
                _ if nested > 0 => {}
                b"w:p" if in_paragraph => {
                    in_paragraph = false;
                    paragraphs.push(std::mem::take(&mut current));
                }
                b"w:r" => in_run = false,
                b"w:t" => in_text = false,
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if nested > 0 {
                    continue;
                }
                match e.name().as_ref() {
                    b"w:p" => paragraphs.push(String::new()),
                    b"w:tab" if in_run => current.push('\t'),
                    b"w:cr" if in_run => current.push('\n'),
                    b"w:br" if in_run && is_line_break(&e) => current.push('\n'),
                    _ => {}
                }
            }
            Ok(Event::Text(e)) => {
                if in_text && nested == 0 {
                    let text = e.unescape().map_err(|e| xml_error(DOCUMENT_PART, e))?;
                    current.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(xml_error(
                    DOCUMENT_PART,
                    format!("error at position {}: {e}", reader.buffer_position()),
                ))
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Page and column breaks carry no text; only text-wrapping breaks do.
fn is_line_break(element: &BytesStart<'_>) -> bool {
    match element.try_get_attribute("w:type") {
        Ok(Some(attr)) => {
            let kind = attr.value.as_ref();
            kind != b"page" && kind != b"column"
        }
        _ => true,
    }
}
