mod docx_extractor;
mod pdf_extractor;

use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub enum ExtractError {
    UnsupportedType(String),
    Failed(String),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::UnsupportedType(suffix) => {
                write!(f, "Unsupported file type: {}", suffix)
            }
            ExtractError::Failed(msg) => write!(f, "Extraction failed: {}", msg),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Extracts plain text from a stored upload. Dispatch is on the extension of
/// the *original* filename; the blob on disk is named by document id.
pub fn extract_text(file_path: &Path, original_name: &str) -> Result<String, ExtractError> {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => pdf_extractor::extract_pdf_text(file_path)
            .map_err(|e| ExtractError::Failed(e.to_string())),
        "docx" => docx_extractor::extract_docx_text(file_path)
            .map_err(|e| ExtractError::Failed(e.to_string())),
        "txt" => {
            let bytes =
                std::fs::read(file_path).map_err(|e| ExtractError::Failed(e.to_string()))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        other => {
            let suffix = if other.is_empty() {
                String::new()
            } else {
                format!(".{}", other)
            };
            Err(ExtractError::UnsupportedType(suffix))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_extension() {
        let err = extract_text(Path::new("/tmp/nonexistent"), "slides.pptx").unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedType(_)));
        assert_eq!(err.to_string(), "Unsupported file type: .pptx");
    }

    #[test]
    fn rejects_missing_extension() {
        let err = extract_text(Path::new("/tmp/nonexistent"), "README").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file type: ");
    }

    #[test]
    fn dispatches_on_original_name_not_blob_path() {
        let dir = tempfile::tempdir().unwrap();
        // Blob names carry no extension, like the upload handler writes them.
        let blob = dir.path().join("5f3a");
        std::fs::write(&blob, "plain contents").unwrap();

        let text = extract_text(&blob, "notes.txt").unwrap();
        assert_eq!(text, "plain contents");
    }

    #[test]
    fn txt_decode_is_lossy() {
        let dir = tempfile::tempdir().unwrap();
        let blob = dir.path().join("blob");
        std::fs::write(&blob, [b'h', b'i', 0xFF, b'!']).unwrap();

        let text = extract_text(&blob, "broken.TXT").unwrap();
        assert!(text.starts_with("hi"));
        assert!(text.ends_with('!'));
    }

    #[test]
    fn garbage_pdf_fails_extraction_not_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let blob = dir.path().join("blob");
        std::fs::write(&blob, "this is not a pdf").unwrap();

        let err = extract_text(&blob, "report.pdf").unwrap_err();
        assert!(matches!(err, ExtractError::Failed(_)));
    }
}
