use std::mem::discriminant;

use serde::Serialize;

use crate::parsing::rope::span::Span;

/// A frame in the container stack representing a nesting level.
///
/// Containers wrap leaf blocks and can nest arbitrarily.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ContainerFrame {
    /// A blockquote container with its nesting depth.
    BlockQuote {
        /// How many `>` prefixes (1 = single quote, 2 = nested, etc.)
        depth: u8,
    },
}

/// Marker types for list items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Marker {
    Dash,     // "-"
    Asterisk, // "*"
    Plus,     // "+"
    Numbered, // "1.", "2)", etc.
}

/// The structural role of a block.
///
/// Two blocks are the "same kind" for diffing when their variants match,
/// regardless of the data carried inside the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BlockKind {
    /// A paragraph line (default when no other block opener matches).
    Paragraph,
    /// A line with nothing but whitespace after its container prefixes.
    Blank,
    /// An ATX heading, `#` through `######`.
    Heading { level: u8 },
    /// A bullet or numbered list item.
    ListItem {
        marker: Marker,
        /// Leading whitespace characters before the marker.
        indent: usize,
    },
    /// A task list item, `- [ ]` or `- [x]`.
    Checklist { checked: bool, indent: usize },
    /// `---`, `***` or `___`.
    ThematicBreak,
}

impl BlockKind {
    /// Short label used in logs and text snapshots.
    pub fn label(&self) -> String {
        match self {
            BlockKind::Paragraph => "Paragraph".to_string(),
            BlockKind::Blank => "Blank".to_string(),
            BlockKind::Heading { level } => format!("Heading({level})"),
            BlockKind::ListItem { marker, indent } => format!("ListItem({marker:?}, {indent})"),
            BlockKind::Checklist { checked, indent } => {
                format!("Checklist({}, {indent})", if *checked { "x" } else { " " })
            }
            BlockKind::ThematicBreak => "ThematicBreak".to_string(),
        }
    }
}

/// One parsed structural unit of the document.
///
/// Blocks are values: an edit never mutates a block in place, it produces a
/// replacement (or a [`Block::shifted`] copy when only the position moved).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// The container stack this block is nested within.
    pub containers: Vec<ContainerFrame>,
    pub kind: BlockKind,
    /// The line without its `\n` terminator.
    pub range: Span,
    /// The full line including the terminator this block owns.
    pub enclosing_range: Span,
    /// Semantic payload: no quote prefix, no block marker, no `\r`.
    pub content_range: Span,
}

impl Block {
    /// Returns a copy with every range translated by `delta` characters.
    ///
    /// # Panics
    /// Panics if the shift would move any range below zero.
    #[must_use]
    pub fn shifted(&self, delta: isize) -> Self {
        Self {
            containers: self.containers.clone(),
            kind: self.kind.clone(),
            range: self.range.shifted(delta),
            enclosing_range: self.enclosing_range.shifted(delta),
            content_range: self.content_range.shifted(delta),
        }
    }

    /// Structural identity: same [`BlockKind`] variant.
    pub fn same_kind(&self, other: &Block) -> bool {
        discriminant(&self.kind) == discriminant(&other.kind)
    }

    /// Whether the block owns a trailing `\n`.
    pub fn is_terminated(&self) -> bool {
        self.range.end < self.enclosing_range.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(kind: BlockKind, start: usize, end: usize) -> Block {
        Block {
            containers: vec![],
            kind,
            range: Span::new(start, end - 1),
            enclosing_range: Span::new(start, end),
            content_range: Span::new(start + 2, end - 1),
        }
    }

    #[test]
    fn shifted_translates_all_ranges() {
        let b = block(BlockKind::Heading { level: 1 }, 0, 8);
        let moved = b.shifted(5);
        assert_eq!(moved.range, Span::new(5, 12));
        assert_eq!(moved.enclosing_range, Span::new(5, 13));
        assert_eq!(moved.content_range, Span::new(7, 12));
        assert_eq!(moved.kind, b.kind);
    }

    #[test]
    fn shifted_by_negative_delta() {
        let b = block(BlockKind::Paragraph, 10, 15);
        assert_eq!(b.shifted(-10).enclosing_range, Span::new(0, 5));
    }

    #[test]
    #[should_panic(expected = "leaves the buffer")]
    fn shifted_underflow_is_fatal() {
        let b = block(BlockKind::Paragraph, 1, 5);
        let _ = b.shifted(-2);
    }

    #[test]
    fn same_kind_ignores_variant_data() {
        let h1 = block(BlockKind::Heading { level: 1 }, 0, 8);
        let h2 = block(BlockKind::Heading { level: 3 }, 8, 20);
        let p = block(BlockKind::Paragraph, 0, 8);
        assert!(h1.same_kind(&h2));
        assert!(!h1.same_kind(&p));
    }

    #[test]
    fn terminated_blocks_own_a_newline() {
        let b = block(BlockKind::Paragraph, 0, 4);
        assert!(b.is_terminated());
        let last = Block {
            range: Span::new(4, 7),
            enclosing_range: Span::new(4, 7),
            ..b
        };
        assert!(!last.is_terminated());
    }

    #[test]
    fn labels() {
        assert_eq!(BlockKind::Heading { level: 2 }.label(), "Heading(2)");
        assert_eq!(
            BlockKind::Checklist {
                checked: true,
                indent: 2
            }
            .label(),
            "Checklist(x, 2)"
        );
        assert_eq!(
            BlockKind::ListItem {
                marker: Marker::Dash,
                indent: 0
            }
            .label(),
            "ListItem(Dash, 0)"
        );
    }
}
