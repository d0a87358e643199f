use super::kinds::{Heading, ListItem, ThematicBreak};
use super::types::BlockKind;

/// A recognised block opener: the kind plus how many characters of marker
/// precede the block's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOpen {
    pub kind: BlockKind,
    pub marker_len: usize,
}

/// Indentation of four or more columns turns a would-be heading into text.
const MAX_HEADING_INDENT: usize = 3;

/// Detects a block opener on the remainder of a (non-blank) line.
///
/// `indent` is the number of leading whitespace characters of `remainder`;
/// `marker_len` in the result is measured from after that indentation.
pub fn try_open_leaf(remainder: &str, indent: usize) -> Option<BlockOpen> {
    let rest = &remainder[remainder.len() - remainder.trim_start_matches([' ', '\t']).len()..];

    // Precedence: a rule beats a list item ("* * *" is a rule).
    if ThematicBreak::matches(rest) {
        return Some(BlockOpen {
            kind: BlockKind::ThematicBreak,
            marker_len: 0,
        });
    }

    if indent <= MAX_HEADING_INDENT
        && let Some((level, marker_len)) = Heading::open(rest)
    {
        return Some(BlockOpen {
            kind: BlockKind::Heading { level },
            marker_len,
        });
    }

    if let Some((checked, marker_len)) = ListItem::open_checklist(rest) {
        return Some(BlockOpen {
            kind: BlockKind::Checklist { checked, indent },
            marker_len,
        });
    }

    ListItem::open(rest).map(|(marker, marker_len)| BlockOpen {
        kind: BlockKind::ListItem { marker, indent },
        marker_len,
    })
}
