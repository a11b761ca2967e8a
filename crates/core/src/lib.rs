//! Core domain types, output document model, and collaborator traits
//! for converting slide decks and PDFs into OCR'd DOCX documents.

pub mod document;
pub mod engines;
pub mod error;

pub use document::{Block, Fragment, OutputDocument};
pub use engines::{DocumentWriter, OcrEngine};
pub use error::{Error, Result};
