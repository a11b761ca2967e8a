//! The output document model.
//!
//! A conversion produces an [`OutputDocument`]: an ordered, append-only
//! sequence of blocks mirroring the source slide/page order. The document
//! is assembled fully in memory and then handed to a
//! [`DocumentWriter`](crate::DocumentWriter) exactly once.

use serde::{Deserialize, Serialize};

/// A formatted piece of run text inside a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// The text content, already trimmed with a single trailing space.
    pub text: String,

    /// Whether the fragment should be rendered bold.
    pub bold: bool,
}

impl Fragment {
    /// Create a plain (non-bold) fragment.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    /// Create a bold fragment.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// One block of the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    /// A heading with a level (1 = slide/page heading, 2 = OCR source heading).
    Heading {
        /// Heading level, 1-based, smaller is more prominent.
        level: u8,
        /// Heading text.
        text: String,
    },

    /// A paragraph composed of ordered formatted fragments.
    ///
    /// May be empty: one paragraph is kept per source paragraph even when
    /// every run in it was blank, preserving slide structure.
    Paragraph {
        /// Ordered fragments; concatenation yields the paragraph text.
        fragments: Vec<Fragment>,
    },

    /// An embedded image, carried by file name and raw bytes.
    Image {
        /// Bare media file name, e.g. `image1.png`.
        name: String,
        /// Raw image bytes as read from the package.
        data: Vec<u8>,
    },

    /// A page break.
    PageBreak,
}

/// An ordered, append-only sequence of output blocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputDocument {
    blocks: Vec<Block>,
}

impl OutputDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// All blocks in append order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Append an arbitrary block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Append a heading block.
    pub fn push_heading(&mut self, level: u8, text: impl Into<String>) {
        self.blocks.push(Block::Heading {
            level,
            text: text.into(),
        });
    }

    /// Append a paragraph of pre-formatted fragments.
    pub fn push_paragraph(&mut self, fragments: Vec<Fragment>) {
        self.blocks.push(Block::Paragraph { fragments });
    }

    /// Append a paragraph holding a single plain-text fragment.
    pub fn push_text(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Paragraph {
            fragments: vec![Fragment::plain(text)],
        });
    }

    /// Append an embedded image block.
    pub fn push_image(&mut self, name: impl Into<String>, data: Vec<u8>) {
        self.blocks.push(Block::Image {
            name: name.into(),
            data,
        });
    }

    /// Append a page break.
    pub fn push_page_break(&mut self) {
        self.blocks.push(Block::PageBreak);
    }

    /// Number of blocks appended so far.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether no blocks have been appended.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Headings at the given level, in document order.
    pub fn headings_at(&self, level: u8) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { level: l, text } if *l == level => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}
