//! Error types for document conversion.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a package to a document.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read an input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// ZIP archive error while extracting a PPTX package.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error in a slide or relationship part.
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// A required slide content part is absent from the package.
    ///
    /// Fatal for the package being converted; a batch run records the
    /// failure and continues with the next package.
    #[error("Missing required slide part: slide{ordinal}.xml")]
    MissingSlidePart {
        /// 1-based slide ordinal.
        ordinal: usize,
    },

    /// The OCR engine could not be run (bad binary path, not installed).
    ///
    /// Fatal to the whole run rather than per slide: every remaining image
    /// and package would hit the same wall, so it is surfaced immediately.
    #[error("OCR engine failure: {0}")]
    OcrEngine(String),

    /// The PDF page renderer failed or produced no pages.
    #[error("PDF rendering error: {0}")]
    PdfRender(String),

    /// Failed to build or save the output document.
    #[error("Document write error: {0}")]
    DocumentWrite(String),
}
