//! Text run formatting and slide text extraction.
//!
//! Slide text lives in `<a:p>` paragraph nodes containing `<a:r>` runs;
//! each run carries optional `<a:rPr>` properties and an `<a:t>` text
//! node. One output paragraph is emitted per source paragraph, in document
//! order, even when every run in it is blank; that keeps the output
//! aligned with the slide's structure at the cost of the occasional
//! visible blank paragraph.

use deckdoc_core::Fragment;

use crate::xml::XmlNode;

/// Format a single run node into a fragment, or `None` when the run
/// contributes nothing.
///
/// Bold is decided first and defensively: a run without an `rPr` node is
/// not bold, and only the recognized truthy tokens `"1"` and `"true"` on
/// the `b` attribute mean bold (`b=""` does not). Non-empty text is
/// trimmed and given exactly one trailing space so consecutive runs stay
/// separated when concatenated.
pub fn format_run(run: &XmlNode) -> Option<Fragment> {
    let bold = run
        .child("rPr")
        .map(|props| is_truthy(props.attr("b")))
        .unwrap_or(false);

    let text = run.child("t")?.text().trim();
    if text.is_empty() {
        return None;
    }

    Some(Fragment {
        text: format!("{} ", text),
        bold,
    })
}

/// Whether an attribute value is a recognized truthy token.
fn is_truthy(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true"))
}

/// Extract the slide's paragraphs as ordered fragment lists.
///
/// Walks `<a:p>` nodes in document order; within each, formats the direct
/// `<a:r>` children in order and keeps every non-empty fragment. The
/// returned vector has one entry per source paragraph, empty or not.
pub fn extract_paragraphs(slide_root: &XmlNode) -> Vec<Vec<Fragment>> {
    slide_root
        .descendants("p")
        .into_iter()
        .map(|paragraph| {
            paragraph
                .children_named("r")
                .filter_map(format_run)
                .collect()
        })
        .collect()
}
