//! Recognized evidence file formats

use std::path::Path;

/// Image extensions accepted as evidence photos (lower-case, no dot)
pub const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "webp", "bmp", "tif", "tiff"];

/// Document format classes in extraction priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormatClass {
    /// `.xls`, `.xlsx`
    Spreadsheet,
    /// `.docx`, `.doc`
    RichText,
    /// `.txt`
    PlainText,
    /// `.pdf`, only readable through page rendering + vision
    PageDescription,
}

impl FormatClass {
    /// All classes, highest priority first
    pub const PRIORITY: [FormatClass; 4] = [
        FormatClass::Spreadsheet,
        FormatClass::RichText,
        FormatClass::PlainText,
        FormatClass::PageDescription,
    ];

    /// Extensions belonging to this class
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FormatClass::Spreadsheet => &["xls", "xlsx"],
            FormatClass::RichText => &["docx", "doc"],
            FormatClass::PlainText => &["txt"],
            FormatClass::PageDescription => &["pdf"],
        }
    }

    /// Classify a path by its extension (case-insensitive)
    pub fn of(path: &Path) -> Option<FormatClass> {
        let ext = lower_extension(path)?;
        Self::PRIORITY
            .into_iter()
            .find(|class| class.extensions().contains(&ext.as_str()))
    }
}

/// Lower-cased extension of a path, if any
pub fn lower_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Whether the path has a recognized image extension
pub fn is_image(path: &Path) -> bool {
    lower_extension(path).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Whether the path has a recognized document extension
pub fn is_document(path: &Path) -> bool {
    FormatClass::of(path).is_some()
}

/// Whether the path is any recognized evidence file
pub fn is_resource(path: &Path) -> bool {
    is_image(path) || is_document(path)
}
