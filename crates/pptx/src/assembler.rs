//! Deck assembly: drives the per-slide extractors over slides 1..N and
//! owns the output document being built.

use std::fs;

use deckdoc_core::{Error, OcrEngine, OutputDocument, Result};

use crate::images::extract_images;
use crate::package::Package;
use crate::rels::RelationshipIndex;
use crate::text::extract_paragraphs;
use crate::xml::XmlNode;

/// Assembles one [`OutputDocument`] from an extracted package.
///
/// Slides are processed strictly in ascending ordinal order; output block
/// order mirrors source slide order. Per slide it emits a text heading,
/// the slide's paragraphs, a page break, an images heading, the OCR'd
/// images, and a final page break.
pub struct DeckAssembler<'a> {
    ocr: &'a dyn OcrEngine,
}

impl<'a> DeckAssembler<'a> {
    /// Create an assembler backed by the given OCR engine.
    pub fn new(ocr: &'a dyn OcrEngine) -> Self {
        Self { ocr }
    }

    /// Assemble the full output document for `package`.
    ///
    /// A missing slide content part aborts the conversion with
    /// [`Error::MissingSlidePart`]; a missing relationship part or missing
    /// individual media asset is tolerated at the slide level.
    pub fn assemble(&self, package: &Package) -> Result<OutputDocument> {
        let slide_count = package.slide_count()?;
        log::info!("assembling {} slide(s)", slide_count);

        let mut doc = OutputDocument::new();

        for ordinal in 1..=slide_count {
            let slide_path = package.slide_part(ordinal);
            if !slide_path.is_file() {
                return Err(Error::MissingSlidePart { ordinal });
            }
            let slide_xml = fs::read_to_string(&slide_path)?;
            let slide_root = XmlNode::parse(&slide_xml)?;

            doc.push_heading(1, format!("Slide {} - text", ordinal));
            for fragments in extract_paragraphs(&slide_root) {
                doc.push_paragraph(fragments);
            }
            doc.push_page_break();

            doc.push_heading(1, format!("Slide {} - images", ordinal));
            let rels = RelationshipIndex::load(&package.slide_rels_part(ordinal))?;
            extract_images(&slide_root, &rels, &package.media_dir(), self.ocr, &mut doc)?;
            doc.push_page_break();

            log::debug!("slide {} assembled", ordinal);
        }

        Ok(doc)
    }
}
