//! PDF pages rendered to images for the vision path

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use tracing::debug;

use crate::ExtractorError;

/// Rendered page images living in a scratch directory
///
/// The directory and every image in it are removed when this value is
/// dropped, whichever way the caller leaves its scope.
#[derive(Debug)]
pub struct RenderedPages {
    dir: TempDir,
    pages: Vec<PathBuf>,
}

impl RenderedPages {
    /// Image paths, first page first
    pub fn pages(&self) -> &[PathBuf] {
        &self.pages
    }

    /// Scratch directory holding the images
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Renders leading PDF pages with a `pdftoppm` compatible program
#[derive(Debug, Clone)]
pub struct PageRenderer {
    program: String,
    dpi: u32,
    max_pages: usize,
}

impl PageRenderer {
    /// Create a renderer
    pub fn new(program: impl Into<String>, dpi: u32, max_pages: usize) -> Self {
        Self {
            program: program.into(),
            dpi,
            max_pages,
        }
    }

    /// Render up to `max_pages` pages of `pdf` to PNG files
    ///
    /// A failure on the first page is an error; a failure on a later page
    /// means the document is shorter, and rendering stops there.
    pub fn render(&self, pdf: &Path) -> Result<RenderedPages, ExtractorError> {
        let dir = tempfile::tempdir()?;
        let mut pages = Vec::new();

        for page_no in 1..=self.max_pages {
            let prefix = dir.path().join(format!("page-{}", page_no));
            let image = prefix.with_extension("png");

            let output = Command::new(&self.program)
                .arg("-r")
                .arg(self.dpi.to_string())
                .arg("-f")
                .arg(page_no.to_string())
                .arg("-l")
                .arg(page_no.to_string())
                .arg("-png")
                .arg("-singlefile")
                .arg(pdf)
                .arg(&prefix)
                .output()
                .map_err(|e| ExtractorError::Program {
                    program: self.program.clone(),
                    message: e.to_string(),
                })?;

            let rendered = output.status.success()
                && std::fs::metadata(&image).map(|m| m.len() > 0).unwrap_or(false);
            if !rendered {
                if page_no == 1 {
                    return Err(ExtractorError::Program {
                        program: self.program.clone(),
                        message: format!(
                            "could not render first page of {}: {}",
                            pdf.display(),
                            String::from_utf8_lossy(&output.stderr).trim()
                        ),
                    });
                }
                debug!(pdf = %pdf.display(), page_no, "Stopping render, page not produced");
                break;
            }
            pages.push(image);
        }

        Ok(RenderedPages { dir, pages })
    }
}
