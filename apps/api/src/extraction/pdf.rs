use super::ExtractionError;

/// Concatenates the text of every page in page order.
/// Pages without extractable text contribute an empty string.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    tracing::debug!("Extracted {} PDF page(s)", pages.len());
    Ok(pages.concat())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::fixtures::pdf_with_pages;

    #[test]
    fn test_garbage_bytes_are_a_pdf_error() {
        let result = extract_pdf(b"not a pdf at all");
        assert!(matches!(result, Err(ExtractionError::Pdf(_))));
    }

    #[test]
    fn test_pages_are_concatenated_in_page_order() {
        let bytes = pdf_with_pages(&["Alpha", "Beta", "Gamma"]);
        let text = extract_pdf(&bytes).unwrap();
        let words: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(words, ["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn test_page_without_text_contributes_nothing() {
        let bytes = pdf_with_pages(&["Alpha", "", "Omega"]);

        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].trim(), "");

        let text = extract_pdf(&bytes).unwrap();
        let words: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(words, ["Alpha", "Omega"]);
    }
}
