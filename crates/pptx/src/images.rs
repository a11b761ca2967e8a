//! Embedded-image extraction and OCR for one slide.
//!
//! Images are referenced from slide content through `<a:blip r:embed="rIdN"/>`
//! nodes; the relationship index maps the id to a media target. Output
//! order follows the order the references appear in the slide content, not
//! the order assets sit in the media directory.

use std::path::Path;

use deckdoc_core::{OcrEngine, OutputDocument, Result};

use crate::rels::{target_file_name, RelationshipIndex};
use crate::xml::XmlNode;

/// Media extensions eligible for OCR.
const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Whether the file name carries an OCR-eligible extension.
fn is_supported_image(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s))
        })
        .unwrap_or(false)
}

/// Extract and OCR every embedded image referenced by the slide, appending
/// for each: an OCR-source heading naming the asset, the extracted text as
/// a paragraph, and the original image.
///
/// Per-reference faults are absorbed here: a dangling relationship id, an
/// unsupported media type, or a missing asset file skip that reference
/// only. An OCR engine failure propagates and aborts the run.
pub fn extract_images(
    slide_root: &XmlNode,
    rels: &RelationshipIndex,
    media_dir: &Path,
    ocr: &dyn OcrEngine,
    doc: &mut OutputDocument,
) -> Result<()> {
    for blip in slide_root.descendants("blip") {
        let Some(rel_id) = blip.attr("embed") else {
            continue;
        };
        let Some(target) = rels.resolve(rel_id) else {
            log::debug!("dangling relationship id {}, skipping reference", rel_id);
            continue;
        };

        let name = target_file_name(target);
        if !is_supported_image(name) {
            log::debug!("unsupported media type for {}, skipping", name);
            continue;
        }

        let asset = media_dir.join(name);
        if !asset.is_file() {
            log::warn!("media asset {} missing from package, skipping", name);
            continue;
        }

        let text = ocr.extract_text(&asset)?;
        let data = std::fs::read(&asset)?;

        doc.push_heading(2, format!("Text source: {}", name));
        doc.push_text(text);
        doc.push_image(name, data);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckdoc_core::{Block, Error};
    use std::cell::RefCell;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Records every OCR invocation and answers with canned text.
    struct FakeOcr {
        seen: RefCell<Vec<PathBuf>>,
    }

    impl FakeOcr {
        fn new() -> Self {
            Self {
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl OcrEngine for FakeOcr {
        fn extract_text(&self, image: &Path) -> Result<String> {
            self.seen.borrow_mut().push(image.to_path_buf());
            Ok(format!("text from {}", image.file_name().unwrap().to_string_lossy()))
        }
    }

    /// An engine that always fails, standing in for a bad binary path.
    struct BrokenOcr;

    impl OcrEngine for BrokenOcr {
        fn extract_text(&self, _image: &Path) -> Result<String> {
            Err(Error::OcrEngine("tesseract not found".to_string()))
        }
    }

    fn slide_with_blips(ids: &[&str]) -> XmlNode {
        let mut pic_list = XmlNode::element("spTree");
        for id in ids {
            pic_list = pic_list.with_child(
                XmlNode::element("pic")
                    .with_child(XmlNode::element("blip").with_attr("embed", *id)),
            );
        }
        XmlNode::element("sld").with_child(pic_list)
    }

    fn index(pairs: &[(&str, &str)]) -> RelationshipIndex {
        let body: String = pairs
            .iter()
            .map(|(id, target)| format!(r#"<Relationship Id="{}" Target="{}"/>"#, id, target))
            .collect();
        RelationshipIndex::from_xml(&format!("<Relationships>{}</Relationships>", body)).unwrap()
    }

    fn media_dir_with(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for file in files {
            std::fs::write(dir.path().join(file), b"binary").unwrap();
        }
        dir
    }

    #[test]
    fn resolved_image_yields_heading_text_and_image_blocks() {
        let slide = slide_with_blips(&["rId1"]);
        let rels = index(&[("rId1", "../media/image1.png")]);
        let media = media_dir_with(&["image1.png"]);
        let ocr = FakeOcr::new();
        let mut doc = OutputDocument::new();

        extract_images(&slide, &rels, media.path(), &ocr, &mut doc).unwrap();

        assert_eq!(doc.headings_at(2), vec!["Text source: image1.png"]);
        assert!(matches!(
            &doc.blocks()[1],
            Block::Paragraph { fragments } if fragments[0].text == "text from image1.png"
        ));
        assert!(matches!(&doc.blocks()[2], Block::Image { name, .. } if name == "image1.png"));
        assert_eq!(ocr.seen.borrow().len(), 1);
    }

    #[test]
    fn dangling_relationship_is_skipped_without_error() {
        let slide = slide_with_blips(&["rId9", "rId1"]);
        let rels = index(&[("rId1", "../media/image1.png")]);
        let media = media_dir_with(&["image1.png"]);
        let ocr = FakeOcr::new();
        let mut doc = OutputDocument::new();

        extract_images(&slide, &rels, media.path(), &ocr, &mut doc).unwrap();

        // Only the resolvable reference produced output.
        assert_eq!(doc.headings_at(2), vec!["Text source: image1.png"]);
    }

    #[test]
    fn unsupported_media_type_never_reaches_ocr() {
        let slide = slide_with_blips(&["rId1"]);
        let rels = index(&[("rId1", "../media/chart.svg")]);
        let media = media_dir_with(&["chart.svg"]);
        let ocr = FakeOcr::new();
        let mut doc = OutputDocument::new();

        extract_images(&slide, &rels, media.path(), &ocr, &mut doc).unwrap();

        assert!(doc.is_empty());
        assert!(ocr.seen.borrow().is_empty());
    }

    #[test]
    fn missing_asset_file_is_skipped() {
        let slide = slide_with_blips(&["rId1"]);
        let rels = index(&[("rId1", "../media/gone.png")]);
        let media = media_dir_with(&[]);
        let ocr = FakeOcr::new();
        let mut doc = OutputDocument::new();

        extract_images(&slide, &rels, media.path(), &ocr, &mut doc).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn references_follow_slide_content_order() {
        let slide = slide_with_blips(&["rId2", "rId1"]);
        let rels = index(&[
            ("rId1", "../media/a.png"),
            ("rId2", "../media/b.png"),
        ]);
        let media = media_dir_with(&["a.png", "b.png"]);
        let ocr = FakeOcr::new();
        let mut doc = OutputDocument::new();

        extract_images(&slide, &rels, media.path(), &ocr, &mut doc).unwrap();

        assert_eq!(
            doc.headings_at(2),
            vec!["Text source: b.png", "Text source: a.png"]
        );
    }

    #[test]
    fn engine_failure_aborts_extraction() {
        let slide = slide_with_blips(&["rId1"]);
        let rels = index(&[("rId1", "../media/image1.png")]);
        let media = media_dir_with(&["image1.png"]);
        let mut doc = OutputDocument::new();

        let result = extract_images(&slide, &rels, media.path(), &BrokenOcr, &mut doc);
        assert!(matches!(result, Err(Error::OcrEngine(_))));
    }

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image("a.png"));
        assert!(is_supported_image("a.JPG"));
        assert!(is_supported_image("a.jpeg"));
        assert!(!is_supported_image("a.svg"));
        assert!(!is_supported_image("a.gif"));
        assert!(!is_supported_image("noext"));
    }
}
