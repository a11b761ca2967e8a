//! Extracted PPTX package and its scratch-area layout.
//!
//! A .pptx file is a ZIP archive. [`Package::extract`] unzips it into a
//! temporary scratch directory whose lifetime is bound to the `Package`
//! value; the scratch area is removed on every exit path when the value
//! drops. The fixed internal layout is `ppt/slides/`, `ppt/slides/_rels/`
//! and `ppt/media/`, and all three are guaranteed to exist after
//! extraction even when the archive lacks them, so the slide counter and
//! media lookups never fail on a missing directory.

use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

use deckdoc_core::{Error, Result};
use tempfile::TempDir;
use zip::ZipArchive;

/// An extracted slide-deck package rooted at a scratch directory.
#[derive(Debug)]
pub struct Package {
    root: PathBuf,
    // Keeps the scratch directory alive; None when adopting an existing
    // extraction whose lifetime the caller manages.
    _scratch: Option<TempDir>,
}

impl Package {
    /// Extract a .pptx archive into a fresh scratch directory.
    pub fn extract(pptx: &Path) -> Result<Self> {
        let scratch = TempDir::new()?;
        let file = File::open(pptx)?;
        let mut archive = ZipArchive::new(file)
            .map_err(|e| Error::ZipError(format!("failed to open '{}': {}", pptx.display(), e)))?;
        archive
            .extract(scratch.path())
            .map_err(|e| Error::ZipError(format!("failed to extract '{}': {}", pptx.display(), e)))?;

        log::debug!("extracted {} to {}", pptx.display(), scratch.path().display());

        let package = Self {
            root: scratch.path().to_path_buf(),
            _scratch: Some(scratch),
        };
        package.ensure_layout()?;
        Ok(package)
    }

    /// Adopt an already-extracted package rooted at `root`.
    ///
    /// This is the container-extractor collaborator boundary: anything that
    /// produces the `ppt/slides`, `ppt/slides/_rels`, `ppt/media` layout
    /// can hand its root here. The caller keeps ownership of the directory.
    pub fn from_scratch_root(root: impl Into<PathBuf>) -> Result<Self> {
        let package = Self {
            root: root.into(),
            _scratch: None,
        };
        package.ensure_layout()?;
        Ok(package)
    }

    /// Create the fixed layout directories if the archive lacked them.
    fn ensure_layout(&self) -> Result<()> {
        fs::create_dir_all(self.slides_dir())?;
        fs::create_dir_all(self.rels_dir())?;
        fs::create_dir_all(self.media_dir())?;
        Ok(())
    }

    /// Scratch root of the extracted package.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the slide content parts.
    pub fn slides_dir(&self) -> PathBuf {
        self.root.join("ppt").join("slides")
    }

    /// Directory holding the per-slide relationship parts.
    pub fn rels_dir(&self) -> PathBuf {
        self.slides_dir().join("_rels")
    }

    /// Directory holding the package's media assets.
    pub fn media_dir(&self) -> PathBuf {
        self.root.join("ppt").join("media")
    }

    /// Path of the content part for the slide with the given 1-based ordinal.
    pub fn slide_part(&self, ordinal: usize) -> PathBuf {
        self.slides_dir().join(format!("slide{}.xml", ordinal))
    }

    /// Path of the relationship part for the slide with the given ordinal.
    pub fn slide_rels_part(&self, ordinal: usize) -> PathBuf {
        self.rels_dir().join(format!("slide{}.xml.rels", ordinal))
    }

    /// Number of slide parts in the package.
    ///
    /// Counts only files strictly matching `slide<N>.xml`; other parts
    /// that may appear in the slides directory never inflate the count.
    pub fn slide_count(&self) -> Result<usize> {
        let mut count = 0;
        for entry in fs::read_dir(self.slides_dir())? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            if is_slide_part(&name.to_string_lossy()) {
                count += 1;
            }
        }
        Ok(count)
    }
}

/// Whether a file name matches the slide-part naming convention
/// `slide<N>.xml` with N one or more ASCII digits.
fn is_slide_part(name: &str) -> bool {
    name.strip_prefix("slide")
        .and_then(|rest| rest.strip_suffix(".xml"))
        .map(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;

    fn write_zip(dest: &Path, entries: &[(&str, &str)]) {
        let mut writer = zip::ZipWriter::new(File::create(dest).unwrap());
        for (name, content) in entries {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_is_slide_part() {
        assert!(is_slide_part("slide1.xml"));
        assert!(is_slide_part("slide42.xml"));
        assert!(!is_slide_part("slide.xml"));
        assert!(!is_slide_part("slide1.xml.rels"));
        assert!(!is_slide_part("presProps.xml"));
        assert!(!is_slide_part("slideLayout1.xml"));
        assert!(!is_slide_part("slide1a.xml"));
    }

    #[test]
    fn extract_creates_fixed_layout_even_for_empty_archive() {
        let dir = TempDir::new().unwrap();
        let pptx = dir.path().join("empty.pptx");
        write_zip(&pptx, &[("docProps/app.xml", "<Properties/>")]);

        let package = Package::extract(&pptx).unwrap();
        assert!(package.slides_dir().is_dir());
        assert!(package.rels_dir().is_dir());
        assert!(package.media_dir().is_dir());
        assert_eq!(package.slide_count().unwrap(), 0);
    }

    #[test]
    fn slide_count_ignores_non_slide_parts() {
        let dir = TempDir::new().unwrap();
        let package = Package::from_scratch_root(dir.path()).unwrap();
        fs::write(package.slide_part(1), "<sld/>").unwrap();
        fs::write(package.slide_part(2), "<sld/>").unwrap();
        fs::write(package.slides_dir().join("presProps.xml"), "<p/>").unwrap();

        assert_eq!(package.slide_count().unwrap(), 2);
    }

    #[test]
    fn extract_reads_slide_parts_out_of_archive() {
        let dir = TempDir::new().unwrap();
        let pptx = dir.path().join("deck.pptx");
        write_zip(
            &pptx,
            &[
                ("ppt/slides/slide1.xml", "<sld/>"),
                ("ppt/slides/_rels/slide1.xml.rels", "<Relationships/>"),
                ("ppt/media/image1.png", "fake"),
            ],
        );

        let package = Package::extract(&pptx).unwrap();
        assert_eq!(package.slide_count().unwrap(), 1);
        assert!(package.slide_part(1).is_file());
        assert!(package.slide_rels_part(1).is_file());
        assert!(package.media_dir().join("image1.png").is_file());
    }

    #[test]
    fn extract_fails_on_non_zip_input() {
        let dir = TempDir::new().unwrap();
        let bogus = dir.path().join("not-a-deck.pptx");
        fs::write(&bogus, "plain text").unwrap();
        assert!(matches!(Package::extract(&bogus), Err(Error::ZipError(_))));
    }
}
