//! PDF page rasterization via `pdftoppm`.
//!
//! Each page is rendered to a PNG in a caller-provided scratch directory.
//! `pdftoppm` numbers its outputs (`page-1.png`, `page-2.png`, ...) with
//! zero padding at higher page counts, so sorting the produced paths
//! lexicographically yields page order.

use std::path::{Path, PathBuf};
use std::process::Command;

use deckdoc_core::{Error, Result};

/// Default rendering resolution in DPI.
pub const DEFAULT_DPI: u32 = 300;

/// Whether `pdftoppm` can be run from `PATH`.
pub fn is_renderer_available() -> bool {
    Command::new("pdftoppm").arg("-v").output().is_ok()
}

/// Render every page of `pdf` to PNG files under `scratch`.
///
/// Returns the page image paths in page order. A PDF that renders to zero
/// pages is an error: there is nothing to OCR and something upstream is
/// wrong with the file.
pub fn render_pages(pdf: &Path, dpi: u32, scratch: &Path) -> Result<Vec<PathBuf>> {
    if !is_renderer_available() {
        return Err(Error::PdfRender(
            "pdftoppm not found; install poppler-utils for PDF support".to_string(),
        ));
    }
    let prefix = scratch.join("page");

    log::info!("rendering {} at {} dpi", pdf.display(), dpi);
    let output = Command::new("pdftoppm")
        .arg("-png")
        .arg("-r")
        .arg(dpi.to_string())
        .arg(pdf)
        .arg(&prefix)
        .output()
        .map_err(|e| Error::PdfRender(format!("failed to run pdftoppm: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::PdfRender(format!(
            "pdftoppm failed on '{}': {}",
            pdf.display(),
            stderr.trim()
        )));
    }

    let mut pages = collect_page_images(scratch)?;
    pages.sort();

    if pages.is_empty() {
        return Err(Error::PdfRender(format!(
            "pdftoppm produced no pages for '{}'",
            pdf.display()
        )));
    }

    log::debug!("rendered {} page(s)", pages.len());
    Ok(pages)
}

/// PNG files in the scratch directory, unordered.
fn collect_page_images(scratch: &Path) -> Result<Vec<PathBuf>> {
    let mut pages = Vec::new();
    for entry in std::fs::read_dir(scratch)? {
        let path = entry?.path();
        if path.extension().map(|e| e == "png").unwrap_or(false) {
            pages.push(path);
        }
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn collects_only_png_files_and_sorts_to_page_order() {
        let dir = TempDir::new().unwrap();
        for name in ["page-2.png", "page-1.png", "notes.txt", "page-3.png"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let mut pages = collect_page_images(dir.path()).unwrap();
        pages.sort();

        let names: Vec<_> = pages
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["page-1.png", "page-2.png", "page-3.png"]);
    }
}
