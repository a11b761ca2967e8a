//! Per-slide relationship resolution.
//!
//! Every slide part may carry a `_rels/slide<N>.xml.rels` part mapping
//! relationship ids (`rId1`, ...) used inside the slide to media targets
//! (`../media/image1.png`). The index is built once per slide and is
//! read-only afterward.

use std::collections::HashMap;
use std::path::Path;

use deckdoc_core::Result;

use crate::xml::XmlNode;

/// Mapping from relationship id to target path for one slide.
#[derive(Debug, Clone, Default)]
pub struct RelationshipIndex {
    targets: HashMap<String, String>,
}

impl RelationshipIndex {
    /// Load the relationship index from a `.rels` part on disk.
    ///
    /// A missing part is not an error: a slide without media simply has no
    /// relationships, and an empty index is returned.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            log::debug!("no relationship part at {}, using empty index", path.display());
            return Ok(Self::default());
        }
        let xml = std::fs::read_to_string(path)?;
        Self::from_xml(&xml)
    }

    /// Build the index from relationship XML content.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let root = XmlNode::parse(xml)?;
        let mut targets = HashMap::new();

        for rel in root.descendants("Relationship") {
            if let (Some(id), Some(target)) = (rel.attr("Id"), rel.attr("Target")) {
                targets.insert(id.to_string(), target.to_string());
            }
        }

        Ok(Self { targets })
    }

    /// Resolve a relationship id to its target path, verbatim.
    pub fn resolve(&self, id: &str) -> Option<&str> {
        self.targets.get(id).map(String::as_str)
    }

    /// Number of relationships in the index.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the index holds no relationships.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// The bare file name of a relationship target: the segment after the last
/// `/`, regardless of how many directory levels precede it.
///
/// Targets are forward-slash-delimited by the OOXML spec, so this never
/// consults the platform path separator.
pub fn target_file_name(target: &str) -> &str {
    target.rsplit('/').next().unwrap_or(target)
}
