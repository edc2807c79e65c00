//! Text extraction from PDF and DOCX files

use crate::error::{Result, ResumeParserError};
use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
use std::fs;
use std::path::Path;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<String>;
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| {
        ResumeParserError::FileNotReadable(format!("Failed to read '{}': {}", path.display(), e))
    })
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = read_bytes(path)?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ResumeParserError::FileNotReadable(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;
        Ok(text)
    }
}

/// Reads the body paragraphs of a Word document, one paragraph per line.
///
/// Only paragraphs that sit directly in the document body are returned;
/// table cells and text boxes are skipped.
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = read_bytes(path)?;
        let paragraphs = Self::paragraphs(&bytes).map_err(|e| {
            ResumeParserError::FileNotReadable(format!("Failed to read DOCX '{}': {}", path.display(), e))
        })?;
        Ok(paragraphs.join("\n"))
    }
}

impl DocxExtractor {
    pub fn paragraphs(bytes: &[u8]) -> std::result::Result<Vec<String>, docx_rs::ReaderError> {
        let docx = read_docx(bytes)?;

        let paragraphs = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => {
                    let mut text = String::new();
                    push_run_text(&p.children, &mut text);
                    Some(text)
                }
                _ => None,
            })
            .collect();
        Ok(paragraphs)
    }
}

// Paragraph properties (tab stops included) live outside the runs and never reach the text
fn push_run_text(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Tab(_) => text.push('\t'),
                        RunChild::Break(_) => text.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_run_text(&link.children, text),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;
    const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;
    const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"></Relationships>"#;

    fn package(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        );

        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in [
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", PACKAGE_RELS),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS),
            ("word/document.xml", xml.as_str()),
        ] {
            zip.start_file(name, FileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_in_document_order() {
        let bytes = package(concat!(
            r#"<w:p><w:r><w:t>Name: Jane</w:t></w:r><w:r><w:t xml:space="preserve"> Doe</w:t></w:r></w:p>"#,
            "<w:p/>",
            "<w:p><w:r><w:t>Skills</w:t><w:tab/><w:t>Python &amp; SQL</w:t></w:r></w:p>",
            "<w:p><w:r><w:t>Line one</w:t><w:br/><w:t>Line two</w:t></w:r></w:p>",
        ));
        let paragraphs = DocxExtractor::paragraphs(&bytes).unwrap();

        assert_eq!(
            paragraphs,
            vec![
                "Name: Jane Doe".to_string(),
                String::new(),
                "Skills\tPython & SQL".to_string(),
                "Line one\nLine two".to_string(),
            ]
        );
    }

    #[test]
    fn test_table_paragraphs_are_skipped() {
        let bytes = package(concat!(
            "<w:p><w:r><w:t>Before</w:t></w:r></w:p>",
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell text</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
            "<w:p><w:r><w:t>After</w:t></w:r></w:p>",
        ));
        let paragraphs = DocxExtractor::paragraphs(&bytes).unwrap();

        assert_eq!(paragraphs, vec!["Before".to_string(), "After".to_string()]);
    }

    #[test]
    fn test_tab_stops_do_not_leak_into_text() {
        let bytes = package(concat!(
            "<w:p><w:r><w:t>Skills: Python</w:t></w:r></w:p>",
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr></w:p>"#,
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="right" w:pos="9360"/></w:tabs></w:pPr><w:r><w:t>Shipped Docker images</w:t></w:r></w:p>"#,
        ));
        let paragraphs = DocxExtractor::paragraphs(&bytes).unwrap();

        assert_eq!(
            paragraphs,
            vec!["Skills: Python".to_string(), String::new(), "Shipped Docker images".to_string()]
        );
    }

    #[test]
    fn test_garbage_docx_is_not_readable() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"definitely not a zip archive").unwrap();

        let result = DocxExtractor.extract(&path);
        assert!(matches!(result, Err(ResumeParserError::FileNotReadable(_))));
    }

    #[test]
    fn test_garbage_pdf_is_not_readable() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        let result = PdfExtractor.extract(&path);
        assert!(matches!(result, Err(ResumeParserError::FileNotReadable(_))));
    }
}
