//! First-usable-record extraction from an evidence folder

use std::path::{Path, PathBuf};

use cep_domain::{FormatClass, RecordParser, VisionDescriber};
use cep_resolver::EvidencePackage;
use tracing::{debug, info, warn};

use crate::config::ExtractorConfig;
use crate::parser::{DocxParser, LegacyDocParser, SpreadsheetParser, TextParser};
use crate::pdf::PageRenderer;
use crate::ExtractorError;

/// Text pulled from an evidence folder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedRecord {
    /// Extracted text, empty when nothing usable was found
    pub text: String,
    /// File the text came from
    pub source: Option<PathBuf>,
}

impl ExtractedRecord {
    /// Whether no text was found
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Stand-in describer for extractors built without vision support
///
/// PDFs then always fail to describe and are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVision;

impl VisionDescriber for NoVision {
    type Error = ExtractorError;

    fn describe(&self, _images: &[PathBuf], _prompt: &str) -> Result<String, Self::Error> {
        Err(ExtractorError::Vision("no vision describer configured".to_string()))
    }
}

type BoxedParser = Box<dyn RecordParser<Error = ExtractorError>>;

/// Pulls the first usable record text out of an evidence folder
///
/// Files are tried spreadsheet first, then rich text, plain text and
/// finally PDF (rendered pages described by the vision capability).
/// The first non-empty result wins.
pub struct RecordExtractor<V> {
    config: ExtractorConfig,
    parsers: Vec<BoxedParser>,
    renderer: PageRenderer,
    describer: V,
}

impl RecordExtractor<NoVision> {
    /// Extractor that skips PDFs
    pub fn without_vision(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        Self::new(config, NoVision)
    }
}

impl<V: VisionDescriber> RecordExtractor<V> {
    /// Create an extractor using `describer` for PDF pages
    pub fn new(config: ExtractorConfig, describer: V) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        let parsers: Vec<BoxedParser> = vec![
            Box::new(SpreadsheetParser),
            Box::new(DocxParser),
            Box::new(LegacyDocParser::new(config.doc_converter.clone())),
            Box::new(TextParser),
        ];
        let renderer = PageRenderer::new(config.renderer.clone(), config.render_dpi, config.pdf_pages);

        Ok(Self {
            config,
            parsers,
            renderer,
            describer,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// First non-empty record text in `folder`
    ///
    /// Never fails: unreadable files are logged and skipped, and a folder
    /// without usable files yields an empty record.
    pub fn extract_first(&self, folder: &Path) -> ExtractedRecord {
        let package = EvidencePackage::discover(folder);
        if package.documents.is_empty() {
            debug!(folder = %folder.display(), "No record documents");
            return ExtractedRecord::default();
        }

        for path in &package.documents {
            let text = match self.extract_file(path) {
                Ok(text) => text,
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "Could not read record, trying next file");
                    continue;
                }
            };

            let text = self.clip(text.trim());
            if !text.is_empty() {
                info!(file = %path.display(), chars = text.chars().count(), "Extracted record text");
                return ExtractedRecord {
                    text,
                    source: Some(path.clone()),
                };
            }
            debug!(file = %path.display(), "Record file is empty");
        }

        ExtractedRecord::default()
    }

    /// Text of a single document file
    pub fn extract_file(&self, path: &Path) -> Result<String, ExtractorError> {
        match FormatClass::of(path) {
            Some(FormatClass::PageDescription) => self.describe_pdf(path),
            Some(_) => {
                let parser = self
                    .parsers
                    .iter()
                    .find(|p| p.accepts(path))
                    .ok_or_else(|| ExtractorError::Unsupported(path.display().to_string()))?;
                parser.parse(path)
            }
            None => Err(ExtractorError::Unsupported(path.display().to_string())),
        }
    }

    fn describe_pdf(&self, path: &Path) -> Result<String, ExtractorError> {
        let rendered = self.renderer.render(path)?;
        debug!(file = %path.display(), pages = rendered.pages().len(), "Rendered PDF pages");
        self.describer
            .describe(rendered.pages(), &self.config.page_prompt)
            .map_err(|e| ExtractorError::Vision(e.to_string()))
    }

    fn clip(&self, text: &str) -> String {
        text.chars().take(self.config.max_record_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn extractor() -> RecordExtractor<NoVision> {
        RecordExtractor::without_vision(ExtractorConfig::default()).unwrap()
    }

    #[test]
    fn test_missing_folder() {
        let record = extractor().extract_first(Path::new("/no/such/folder"));
        assert_eq!(record, ExtractedRecord::default());
    }

    #[test]
    fn test_first_non_empty_text_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "   ").unwrap();
        fs::write(dir.path().join("b.txt"), "第二份记录").unwrap();
        fs::write(dir.path().join("c.txt"), "第三份记录").unwrap();

        let record = extractor().extract_first(dir.path());
        assert_eq!(record.text, "第二份记录");
        assert!(record.source.unwrap().ends_with("b.txt"));
    }

    #[test]
    fn test_broken_higher_priority_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("record.xlsx"), b"content: not a workbook").unwrap();
        fs::write(dir.path().join("notes.txt"), "纯文本记录").unwrap();

        let record = extractor().extract_first(dir.path());
        assert_eq!(record.text, "纯文本记录");
    }

    #[test]
    fn test_pdf_without_vision_yields_nothing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("scan.pdf"), b"%PDF-1.4").unwrap();
        assert!(extractor().extract_first(dir.path()).is_empty());
    }

    #[test]
    fn test_text_is_clipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("long.txt"), "记".repeat(50)).unwrap();
        let config = ExtractorConfig {
            max_record_chars: 10,
            ..ExtractorConfig::default()
        };
        let record = RecordExtractor::without_vision(config).unwrap().extract_first(dir.path());
        assert_eq!(record.text.chars().count(), 10);
    }

    #[test]
    fn test_unsupported_file() {
        assert!(matches!(
            extractor().extract_file(Path::new("image.jpg")),
            Err(ExtractorError::Unsupported(_))
        ));
    }
}
