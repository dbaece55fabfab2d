//! PowerPoint (.pptx) extraction.
//!
//! Slide order comes from `ppt/presentation.xml` (`p:sldIdLst`), resolved to
//! slide parts through `ppt/_rels/presentation.xml.rels`. Each slide's
//! top-level shapes are visited in z-order and asked for their text through
//! `SlideShape::text`.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{open_zip, read_zip_part, xml_error, ExtractionError};

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";

/// A top-level shape on a slide.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideShape {
    /// `p:sp` — the only shape kind that can carry a text frame.
    AutoShape { paragraphs: Option<Vec<String>> },
    Group,
    GraphicFrame,
    Connector,
    Picture,
    ContentPart,
}

impl SlideShape {
    /// Text of the shape's text frame, or `None` when the shape has none.
    pub fn text(&self) -> Option<String> {
        match self {
            SlideShape::AutoShape {
                paragraphs: Some(paragraphs),
            } => Some(paragraphs.join("\n")),
            _ => None,
        }
    }

    fn from_element(name: &[u8]) -> Option<Self> {
        match name {
            b"p:sp" => Some(SlideShape::AutoShape { paragraphs: None }),
            b"p:grpSp" => Some(SlideShape::Group),
            b"p:graphicFrame" => Some(SlideShape::GraphicFrame),
            b"p:cxnSp" => Some(SlideShape::Connector),
            b"p:pic" => Some(SlideShape::Picture),
            b"p:contentPart" => Some(SlideShape::ContentPart),
            _ => None,
        }
    }
}

/// Joins the text of every text-bearing shape, slide by slide, with `\n`.
pub fn extract_pptx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = open_zip(bytes)?;

    let presentation = read_zip_part(&mut archive, PRESENTATION_PART)?;
    let rels = read_zip_part(&mut archive, PRESENTATION_RELS_PART)?;
    let slide_ids = parse_slide_ids(&presentation)?;
    let targets = parse_relationships(&rels)?;

    let mut texts = Vec::new();
    for rel_id in &slide_ids {
        let target = targets
            .get(rel_id)
            .ok_or_else(|| ExtractionError::MissingPart(format!("slide relationship {rel_id}")))?;
        let part = resolve_target(target);
        let xml = read_zip_part(&mut archive, &part)?;
        let shapes = parse_slide_shapes(&part, &xml)?;
        texts.extend(shapes.iter().filter_map(SlideShape::text));
    }

    tracing::debug!(
        "Extracted {} text shape(s) from {} slide(s)",
        texts.len(),
        slide_ids.len()
    );
    Ok(texts.join("\n"))
}

/// Relationship ids of the slides, in presentation order.
fn parse_slide_ids(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut ids = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"p:sldId" => {
                if let Some(id) = attribute(&e, "r:id", PRESENTATION_PART)? {
                    ids.push(id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(PRESENTATION_PART, e)),
            _ => {}
        }
    }

    Ok(ids)
}

/// Relationship id → target path, as written in the rels part.
fn parse_relationships(xml: &str) -> Result<HashMap<String, String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut targets = HashMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let id = attribute(&e, "Id", PRESENTATION_RELS_PART)?;
                let target = attribute(&e, "Target", PRESENTATION_RELS_PART)?;
                if let (Some(id), Some(target)) = (id, target) {
                    targets.insert(id, target);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(PRESENTATION_RELS_PART, e)),
            _ => {}
        }
    }

    Ok(targets)
}

/// Targets are relative to `ppt/` unless absolute within the package.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{}", target.trim_start_matches("./")),
    }
}

fn attribute(
    element: &BytesStart<'_>,
    name: &str,
    part: &str,
) -> Result<Option<String>, ExtractionError> {
    let Some(attr) = element
        .try_get_attribute(name)
        .map_err(|e| xml_error(part, e))?
    else {
        return Ok(None);
    };
    let value = attr.unescape_value().map_err(|e| xml_error(part, e))?;
    Ok(Some(value.into_owned()))
}

/// Top-level shapes of the slide's `p:spTree`, in document order.
fn parse_slide_shapes(part: &str, xml: &str) -> Result<Vec<SlideShape>, ExtractionError> {
    let mut reader = Reader::from_str(xml);

    let mut shapes = Vec::new();
    let mut depth = 0usize;
    let mut tree_depth: Option<usize> = None;
    let mut current: Option<SlideShape> = None;
    let mut paragraph: Option<String> = None;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                depth += 1;
                let name = e.name();
                match tree_depth {
                    None if name.as_ref() == b"p:spTree" => tree_depth = Some(depth),
                    Some(tree) if depth == tree + 1 => {
                        current = SlideShape::from_element(name.as_ref());
                    }
                    Some(_) => {
                        if let Some(SlideShape::AutoShape { paragraphs }) = current.as_mut() {
                            match name.as_ref() {
                                b"p:txBody" => *paragraphs = Some(Vec::new()),
                                b"a:p" if paragraphs.is_some() => {
                                    paragraph = Some(String::new())
                                }
                                b"a:t" if paragraph.is_some() => in_text = true,
                                _ => {}
                            }
                        }
                    }
                    None => {}
                }
            }
            Ok(Event::Empty(e)) => {
                let name = e.name();
                match tree_depth {
                    Some(tree) if depth == tree => {
                        if let Some(shape) = SlideShape::from_element(name.as_ref()) {
                            shapes.push(shape);
                        }
                    }
                    Some(_) => {
                        if let Some(SlideShape::AutoShape {
                            paragraphs: Some(paragraphs),
                        }) = current.as_mut()
                        {
                            match name.as_ref() {
                                b"a:p" => paragraphs.push(String::new()),
                                b"a:br" => {
                                    if let Some(text) = paragraph.as_mut() {
                                        text.push('\n');
                                    }
                                }
                                _ => {}
                            }
                        }
                    }
                    None => {}
                }
            }
            Ok(Event::End(e)) => {
                let name = e.name();
                match tree_depth {
                    Some(tree) if depth == tree => tree_depth = None,
                    Some(tree) if depth == tree + 1 => {
                        if let Some(shape) = current.take() {
                            shapes.push(shape);
                        }
                    }
                    Some(_) => match name.as_ref() {
                        b"a:t" => in_text = false,
                        b"a:p" => {
                            if let (
                                Some(text),
                                Some(SlideShape::AutoShape {
                                    paragraphs: Some(paragraphs),
                                }),
                            ) = (paragraph.take(), current.as_mut())
                            {
                                paragraphs.push(text);
                            }
                        }
                        _ => {}
                    },
                    None => {}
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Text(e)) => {
                if in_text {
                    if let Some(text) = paragraph.as_mut() {
                        let chunk = e.unescape().map_err(|e| xml_error(part, e))?;
                        text.push_str(&chunk);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(xml_error(
                    part,
                    format!("error at position {}: {e}", reader.buffer_position()),
                ))
            }
            _ => {}
        }
    }

    Ok(shapes)
}
