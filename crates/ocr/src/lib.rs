//! Tesseract-backed OCR engine.
//!
//! Shells out to the `tesseract` binary: `tesseract <image> stdout -l
//! <lang> --psm 1`. The binary location and language profile are fixed per
//! engine instance (set once by the operator), not per call. An image with
//! no recognizable text is a success with empty output; only a failure to
//! run the binary at all is an engine error.

use std::path::{Path, PathBuf};
use std::process::Command;

use deckdoc_core::{Error, OcrEngine, Result};

/// Default language profile, matching the tool's original audience.
pub const DEFAULT_LANGUAGE: &str = "pol";

/// OCR engine invoking the `tesseract` binary as a subprocess.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: PathBuf,
    language: String,
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl TesseractEngine {
    /// Create an engine using `tesseract` from `PATH` and the default
    /// language profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit tesseract binary location.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Use a different tesseract language profile (e.g. `eng`).
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// The configured language profile.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether the configured binary can be run at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .output()
            .is_ok()
    }

    /// Fail fast when the engine is unreachable.
    ///
    /// Called once up front by the CLI so a bad binary path aborts the
    /// whole run instead of surfacing on the first image of some slide.
    pub fn check_available(&self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(Error::OcrEngine(format!(
                "cannot run '{}'; install tesseract-ocr or pass its location explicitly",
                self.binary.display()
            )))
        }
    }
}

impl OcrEngine for TesseractEngine {
    fn extract_text(&self, image: &Path) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg("1") // automatic page segmentation with OSD
            .output()
            .map_err(|e| {
                Error::OcrEngine(format!(
                    "failed to run '{}': {}",
                    self.binary.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::warn!(
                "tesseract exited with {} on {}: {}",
                output.status,
                image.display(),
                stderr.trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
