//! PDF-to-document pipeline.
//!
//! Unlike the slide-deck path there is no cross-referencing to resolve:
//! each page is rasterized, OCR'd, and appended in order as a heading, a
//! text paragraph, and a page break.

pub mod render;

use std::path::{Path, PathBuf};

use deckdoc_core::{OcrEngine, OutputDocument, Result};
use tempfile::TempDir;

pub use render::{is_renderer_available, DEFAULT_DPI};

/// Assembles an [`OutputDocument`] from a PDF file.
pub struct PdfAssembler<'a> {
    ocr: &'a dyn OcrEngine,
    dpi: u32,
}

impl<'a> PdfAssembler<'a> {
    /// Create an assembler backed by the given OCR engine at the default
    /// rendering resolution.
    pub fn new(ocr: &'a dyn OcrEngine) -> Self {
        Self {
            ocr,
            dpi: DEFAULT_DPI,
        }
    }

    /// Override the rendering resolution.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Render, OCR, and assemble every page of `pdf` in order.
    ///
    /// The page images live in a scratch directory scoped to this call and
    /// removed on all exit paths.
    pub fn assemble(&self, pdf: &Path) -> Result<OutputDocument> {
        let scratch = TempDir::new()?;
        let pages = render::render_pages(pdf, self.dpi, scratch.path())?;
        self.assemble_pages(&pages)
    }

    /// Assemble from already-rendered page images, in the given order.
    ///
    /// The seam for tests and for callers that rasterize pages themselves.
    pub fn assemble_pages(&self, pages: &[PathBuf]) -> Result<OutputDocument> {
        let mut doc = OutputDocument::new();
        for (index, page) in pages.iter().enumerate() {
            let text = self.ocr.extract_text(page)?;
            doc.push_heading(1, format!("Page {}", index + 1));
            doc.push_text(text);
            doc.push_page_break();
        }
        Ok(doc)
    }
}
