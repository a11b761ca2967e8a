//! PPTX slide-deck extraction and relationship-resolution pipeline.
//!
//! A .pptx deck is a ZIP package of cross-referenced XML parts. This crate
//! extracts the package to a scratch area, walks each slide's paragraph
//! and image-reference nodes in document order, resolves media through the
//! per-slide relationship index, and assembles text, OCR output, and
//! images into one ordered [`deckdoc_core::OutputDocument`].

pub mod assembler;
pub mod images;
pub mod package;
pub mod rels;
pub mod text;
pub mod xml;

pub use assembler::DeckAssembler;
pub use package::Package;
pub use rels::RelationshipIndex;
pub use xml::XmlNode;
