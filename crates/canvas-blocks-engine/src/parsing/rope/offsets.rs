//! Conversions between character offsets and the rope's UTF-8 byte offsets,
//! plus the line-boundary checks the range resolver needs.
//!
//! Every lookup walks the rope's chunks. The `_from` variants and the
//! newline checks take an [`Anchor`], a known char/byte pair, and start
//! walking there, so a lookup near an edit costs the distance from the
//! nearest block rather than from the start of the buffer.

use xi_rope::Rope;

use super::span::Span;

/// A character offset paired with the byte offset where that character starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anchor {
    pub chars: usize,
    pub bytes: usize,
}

impl Anchor {
    pub const START: Anchor = Anchor { chars: 0, bytes: 0 };

    /// The anchor itself, or the start of the rope when `offset` lies before it.
    fn covering(self, offset: usize) -> Anchor {
        if offset < self.chars {
            Anchor::START
        } else {
            self
        }
    }
}

/// Number of characters in the rope.
pub fn char_len(rope: &Rope) -> usize {
    rope.iter_chunks(..).map(|chunk| chunk.chars().count()).sum()
}

/// Byte offset of the character at `offset`.
///
/// # Panics
/// Panics if `offset` is past the end of the rope.
pub fn char_to_byte(rope: &Rope, offset: usize) -> usize {
    char_to_byte_from(rope, Anchor::START, offset)
}

/// Like [`char_to_byte`], walking forward from `anchor`.
pub fn char_to_byte_from(rope: &Rope, anchor: Anchor, offset: usize) -> usize {
    let anchor = anchor.covering(offset);
    let mut remaining = offset - anchor.chars;
    let mut base = anchor.bytes;
    for chunk in rope.iter_chunks(anchor.bytes..) {
        if let Some((idx, _)) = chunk.char_indices().nth(remaining) {
            return base + idx;
        }
        remaining -= chunk.chars().count();
        base += chunk.len();
    }
    assert!(
        remaining == 0,
        "char offset {offset} is past the end of the buffer"
    );
    base
}

/// Byte range covered by a character span.
pub fn byte_range(rope: &Rope, span: Span) -> std::ops::Range<usize> {
    byte_range_from(rope, Anchor::START, span)
}

pub fn byte_range_from(rope: &Rope, anchor: Anchor, span: Span) -> std::ops::Range<usize> {
    let start = char_to_byte_from(rope, anchor, span.start);
    let end = char_to_byte_from(
        rope,
        Anchor {
            chars: span.start,
            bytes: start,
        },
        span.end,
    );
    start..end
}

/// The character at `offset`, or `None` at or past the end of the rope.
pub fn char_at(rope: &Rope, anchor: Anchor, offset: usize) -> Option<char> {
    let anchor = anchor.covering(offset);
    let mut remaining = offset - anchor.chars;
    for chunk in rope.iter_chunks(anchor.bytes..) {
        if let Some(c) = chunk.chars().nth(remaining) {
            return Some(c);
        }
        remaining -= chunk.chars().count();
    }
    None
}

/// True if the character at `offset` is a line feed.
pub fn is_newline_at(rope: &Rope, anchor: Anchor, offset: usize) -> bool {
    char_at(rope, anchor, offset) == Some('\n')
}

/// True if `offset` starts a line: the buffer start, the buffer end, or just
/// after a line feed.
pub fn is_line_boundary(rope: &Rope, anchor: Anchor, len: usize, offset: usize) -> bool {
    offset == 0 || offset == len || is_newline_at(rope, anchor, offset - 1)
}
