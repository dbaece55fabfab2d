use std::collections::HashMap;

use axum::extract::Multipart;
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::{self, Document, MediaType};

/// A fully-read multipart form: file parts become `Document`s, the rest text.
#[derive(Debug, Default)]
pub struct UploadForm {
    files: HashMap<String, Document>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if let Some(filename) = field.file_name().map(str::to_string) {
                let media_type = MediaType::resolve(field.content_type(), Some(&filename));
                let bytes = field.bytes().await?;
                debug!(
                    field = %name,
                    filename = %filename,
                    media_type = ?media_type,
                    bytes = bytes.len(),
                    "Received upload"
                );
                form.files
                    .insert(name, Document::new(Some(filename), media_type, bytes));
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    pub fn take_file(&mut self, name: &str) -> Option<Document> {
        self.files.remove(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Runs extraction on the blocking pool; PDF and ZIP parsing are CPU-bound.
pub async fn extract_text(document: Document) -> Result<String, AppError> {
    let name = document.display_name().to_string();
    let text = tokio::task::spawn_blocking(move || extraction::extract(&document))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task for {name} failed: {e}")))??;

    debug!("Extracted {} chars from {}", text.len(), name);
    Ok(text)
}

/// Rejects uploads whose media type is not in `accepted`.
pub fn require_media_type(
    document: &Document,
    accepted: &[MediaType],
    expected: &str,
) -> Result<(), AppError> {
    if accepted.contains(&document.media_type) {
        return Ok(());
    }
    Err(AppError::UnsupportedMediaType(format!(
        "{} must be {expected}, got '{}'",
        document.display_name(),
        document.media_type.as_mime()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_require_media_type_accepts_listed_types() {
        let doc = Document::new(Some("cv.pdf".into()), MediaType::Pdf, Bytes::new());
        assert!(require_media_type(&doc, &[MediaType::Pdf, MediaType::WordDocument], "a PDF").is_ok());
    }

    #[test]
    fn test_require_media_type_rejects_others() {
        let doc = Document::new(Some("deck.pptx".into()), MediaType::Presentation, Bytes::new());
        let err = require_media_type(&doc, &[MediaType::Pdf], "a PDF").unwrap_err();
        match err {
            AppError::UnsupportedMediaType(msg) => {
                assert!(msg.contains("deck.pptx"));
                assert!(msg.contains("a PDF"));
            }
            other => panic!("expected unsupported media type, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_extract_text_of_unknown_type_is_empty() {
        let doc = Document::new(
            Some("notes.txt".into()),
            MediaType::Unknown,
            Bytes::from_static(b"hello"),
        );
        assert_eq!(extract_text(doc).await.unwrap(), "");
    }
}
