//! DOCX output via docx-rs.
//!
//! Maps the block model onto the docx-rs builder API: headings become
//! sized bold runs, page breaks become page-break runs, and images are
//! embedded at a fixed 15 cm display width with aspect-preserved height
//! computed from the decoded pixel dimensions.

use std::fs::File;
use std::path::Path;

use deckdoc_core::{Block, DocumentWriter, Error, Fragment, OutputDocument, Result};
use docx_rs::{BreakType, Docx, Paragraph, Pic, Run};
use image::GenericImageView;

/// EMUs per centimeter (OOXML drawing unit).
const EMU_PER_CM: u32 = 360_000;

/// Fixed display width for embedded images.
const IMAGE_WIDTH_CM: u32 = 15;

/// Run sizes in half-points.
const HEADING_SIZE: usize = 32;
const SUBHEADING_SIZE: usize = 28;
const BODY_SIZE: usize = 22;

/// Writes a completed [`OutputDocument`] as a .docx file.
#[derive(Debug, Clone, Default)]
pub struct DocxWriter;

impl DocxWriter {
    /// Create a writer.
    pub fn new() -> Self {
        Self
    }

    fn heading(&self, level: u8, text: &str) -> Paragraph {
        let size = if level <= 1 { HEADING_SIZE } else { SUBHEADING_SIZE };
        Paragraph::new().add_run(Run::new().add_text(text).size(size).bold())
    }

    fn paragraph(&self, fragments: &[Fragment]) -> Paragraph {
        let mut paragraph = Paragraph::new();
        for fragment in fragments {
            let mut run = Run::new().add_text(fragment.text.as_str()).size(BODY_SIZE);
            if fragment.bold {
                run = run.bold();
            }
            paragraph = paragraph.add_run(run);
        }
        paragraph
    }

    /// Build the image paragraph, or `None` when the bytes cannot be
    /// decoded (a corrupt asset should not sink the whole document).
    fn picture(&self, name: &str, data: &[u8]) -> Option<Paragraph> {
        let decoded = match image::load_from_memory(data) {
            Ok(decoded) => decoded,
            Err(e) => {
                log::warn!("cannot decode image {}: {}, skipping embed", name, e);
                return None;
            }
        };

        let (px_width, px_height) = decoded.dimensions();
        let width_emu = IMAGE_WIDTH_CM * EMU_PER_CM;
        let height_emu = (width_emu as u64 * px_height as u64 / px_width.max(1) as u64) as u32;

        let pic = Pic::new(data).size(width_emu, height_emu);
        Some(Paragraph::new().add_run(Run::new().add_image(pic)))
    }
}

impl DocumentWriter for DocxWriter {
    fn write(&self, document: &OutputDocument, dest: &Path) -> Result<()> {
        let mut docx = Docx::new();

        for block in document.blocks() {
            match block {
                Block::Heading { level, text } => {
                    docx = docx.add_paragraph(self.heading(*level, text));
                }
                Block::Paragraph { fragments } => {
                    docx = docx.add_paragraph(self.paragraph(fragments));
                }
                Block::Image { name, data } => {
                    if let Some(paragraph) = self.picture(name, data) {
                        docx = docx.add_paragraph(paragraph);
                    }
                }
                Block::PageBreak => {
                    docx = docx.add_paragraph(
                        Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
                    );
                }
            }
        }

        let file = File::create(dest)?;
        docx.build()
            .pack(file)
            .map_err(|e| Error::DocumentWrite(format!("failed to save '{}': {}", dest.display(), e)))?;

        log::info!("wrote {}", dest.display());
        Ok(())
    }
}
