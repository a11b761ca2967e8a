//! Collaborator traits at the conversion pipeline's seams.
//!
//! The extraction pipeline only knows these traits; concrete engines
//! (tesseract subprocess, docx-rs writer) live in their own crates, and
//! tests substitute fakes.

use std::path::Path;

use crate::{OutputDocument, Result};

/// Optical character recognition over a single raster image.
///
/// The language profile is fixed per engine instance, not per call. An
/// image with no recognizable text yields `Ok("")`; only an unreachable or
/// misconfigured engine returns an error.
pub trait OcrEngine {
    /// Extract text from the image at `image`.
    fn extract_text(&self, image: &Path) -> Result<String>;
}

/// Saves a completed output document to disk.
///
/// Invoked exactly once per conversion, with the full block sequence;
/// never with a partial or interleaved sequence.
pub trait DocumentWriter {
    /// Write `document` to `dest`.
    fn write(&self, document: &OutputDocument, dest: &Path) -> Result<()>;
}
