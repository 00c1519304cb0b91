use std::io::{Error, ErrorKind};
use std::path::Path;

use docx_rs::{DocumentChild, ParagraphChild, RunChild};

/// Concatenates the text of every paragraph, one paragraph per line.
pub fn extract_docx_text<P: AsRef<Path>>(path: P) -> Result<String, Error> {
    let data = std::fs::read(path.as_ref())?;

    let docx = docx_rs::read_docx(&data)
        .map_err(|e| Error::new(ErrorKind::InvalidData, e.to_string()))?;

    let mut paragraphs: Vec<String> = Vec::new();

    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut line = String::new();
            for paragraph_child in &paragraph.children {
                if let ParagraphChild::Run(run) = paragraph_child {
                    for run_child in &run.children {
                        if let RunChild::Text(text) = run_child {
                            line.push_str(&text.text);
                        }
                    }
                }
            }
            paragraphs.push(line);
        }
    }

    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};

    #[test]
    fn paragraphs_become_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.docx");
        let file = std::fs::File::create(&path).unwrap();

        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("First paragraph.")))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Second paragraph.")))
            .build()
            .pack(file)
            .unwrap();

        let text = extract_docx_text(&path).unwrap();
        assert_eq!(text, "First paragraph.\nSecond paragraph.");
    }

    #[test]
    fn rejects_non_docx_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.docx");
        std::fs::write(&path, "not a zip archive").unwrap();

        assert!(extract_docx_text(&path).is_err());
    }
}
