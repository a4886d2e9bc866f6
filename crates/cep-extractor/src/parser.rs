//! Per-format document parsers

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::process::Command;

use calamine::{open_workbook_auto, Data, Reader};
use cep_domain::format::lower_extension;
use cep_domain::{FormatClass, RecordParser};
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, Event};
use zip::ZipArchive;

use crate::ExtractorError;

/// `.xls` / `.xlsx`: every non-empty cell of every sheet, one per line
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetParser;

impl RecordParser for SpreadsheetParser {
    type Error = ExtractorError;

    fn accepts(&self, path: &Path) -> bool {
        FormatClass::of(path) == Some(FormatClass::Spreadsheet)
    }

    fn parse(&self, path: &Path) -> Result<String, Self::Error> {
        let mut workbook = open_workbook_auto(path)?;
        let sheet_names: Vec<String> = workbook.sheet_names().to_vec();

        let mut parts = Vec::new();
        for name in &sheet_names {
            let range = workbook.worksheet_range(name)?;
            for row in range.rows() {
                for cell in row {
                    if matches!(cell, Data::Empty) {
                        continue;
                    }
                    let text = cell.to_string();
                    let text = text.trim();
                    if !text.is_empty() {
                        parts.push(text.to_string());
                    }
                }
            }
        }

        Ok(parts.join("\n"))
    }
}

/// `.docx`: paragraph text from `word/document.xml`
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxParser;

impl RecordParser for DocxParser {
    type Error = ExtractorError;

    fn accepts(&self, path: &Path) -> bool {
        lower_extension(path).as_deref() == Some("docx")
    }

    fn parse(&self, path: &Path) -> Result<String, Self::Error> {
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file)?;
        let mut xml = String::new();
        archive.by_name("word/document.xml")?.read_to_string(&mut xml)?;
        document_paragraphs(&xml)
    }
}

/// Text of every `w:p` paragraph, skipping empty ones
fn document_paragraphs(xml: &str) -> Result<String, ExtractorError> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.name().as_ref() {
                b"w:t" => in_text = true,
                b"w:p" => current.clear(),
                _ => {}
            },
            Event::Empty(ref e) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" => current.push('\n'),
                _ => {}
            },
            Event::Text(ref e) if in_text => {
                current.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Event::GeneralRef(ref e) if in_text => push_reference(&mut current, e)?,
            Event::End(ref e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    let text = current.trim();
                    if !text.is_empty() {
                        paragraphs.push(text.to_string());
                    }
                    current.clear();
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs.join("\n"))
}

/// Character references and the predefined entities are resolved; an
/// unknown entity is kept as written
fn push_reference(out: &mut String, reference: &BytesRef<'_>) -> Result<(), ExtractorError> {
    if let Some(ch) = reference.resolve_char_ref()? {
        out.push(ch);
        return Ok(());
    }
    let name = reference.decode().map_err(quick_xml::Error::from)?;
    match resolve_predefined_entity(&name) {
        Some(text) => out.push_str(text),
        None => {
            out.push('&');
            out.push_str(&name);
            out.push(';');
        }
    }
    Ok(())
}

/// `.doc`: text printed by an external converter (`antiword` by default)
#[derive(Debug, Clone)]
pub struct LegacyDocParser {
    program: String,
}

impl LegacyDocParser {
    /// Use the given converter program
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl RecordParser for LegacyDocParser {
    type Error = ExtractorError;

    fn accepts(&self, path: &Path) -> bool {
        lower_extension(path).as_deref() == Some("doc")
    }

    fn parse(&self, path: &Path) -> Result<String, Self::Error> {
        let output = Command::new(&self.program)
            .arg(path)
            .output()
            .map_err(|e| ExtractorError::Program {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ExtractorError::Program {
                program: self.program.clone(),
                message: format!(
                    "exit code {}: {}",
                    output.status.code().unwrap_or(-1),
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// `.txt`: file contents, invalid UTF-8 replaced
#[derive(Debug, Clone, Copy, Default)]
pub struct TextParser;

impl RecordParser for TextParser {
    type Error = ExtractorError;

    fn accepts(&self, path: &Path) -> bool {
        FormatClass::of(path) == Some(FormatClass::PlainText)
    }

    fn parse(&self, path: &Path) -> Result<String, Self::Error> {
        let bytes = std::fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).trim().to_string())
    }
}
