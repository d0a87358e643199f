//! Decides which blocks an edit touches and which text needs re-parsing.
//!
//! All three steps are pure functions over the block list and the buffer,
//! so the controller can call them in order around the buffer mutation:
//! [`normalize`] and [`affected_block_span`] see the old buffer,
//! [`reparse_range`] sees the new one. Each takes an [`Anchor`] at or before
//! the edit, which is valid in both buffers because the text before the edit
//! does not change.

use std::ops::Range;

use xi_rope::Rope;

use crate::parsing::{
    blocks::Block,
    rope::{Anchor, Span, is_line_boundary, is_newline_at},
};

/// A request to replace a character range with new text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Span,
    pub replacement: String,
}

impl Edit {
    pub fn new(range: Span, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    /// Length of the replacement in characters.
    pub fn inserted_len(&self) -> usize {
        self.replacement.chars().count()
    }

    /// Signed change in buffer length.
    pub fn delta(&self) -> isize {
        self.inserted_len() as isize - self.range.len() as isize
    }
}

/// Rewrites a newline inserted just before an existing newline so that it
/// lands after it instead.
///
/// Inserting `"\nX"` in front of a `\n` and inserting `"X\n"` right after it
/// produce the same buffer, but the second form starts on a line boundary
/// and leaves the line before it untouched. Only pure insertions are
/// rewritten; a replacement of a non-empty range is returned unchanged.
pub fn normalize(edit: Edit, text: &Rope, anchor: Anchor) -> Edit {
    if !edit.range.is_empty()
        || !edit.replacement.starts_with('\n')
        || !is_newline_at(text, anchor, edit.range.start)
    {
        return edit;
    }

    let mut replacement = edit.replacement[1..].to_string();
    replacement.push('\n');
    log::trace!(
        "moved leading newline of insertion at {} past the existing break",
        edit.range.start
    );
    Edit {
        range: Span::empty(edit.range.start + 1),
        replacement,
    }
}

/// Whether `block` must be re-parsed for an edit over `range`.
///
/// A non-empty range touches every block it shares a character with. An
/// insertion touches the block containing its point, but not a terminated
/// block that ends exactly there: text typed after a line break belongs to
/// the next line. The unterminated last block is touched by an insertion
/// at its end.
fn touches(block: &Block, range: Span) -> bool {
    let enclosing = block.enclosing_range;
    if range.is_empty() {
        let at = range.start;
        enclosing.start <= at
            && (at < enclosing.end || (at == enclosing.end && !block.is_terminated()))
    } else {
        enclosing.intersects(range)
    }
}

/// Minimal run of consecutive blocks touched by an edit over `range`.
///
/// Returns `None` when no block is touched, which only happens for an
/// insertion at the end of a buffer that is empty or ends with a line break.
pub fn affected_block_span(blocks: &[Block], range: Span) -> Option<Range<usize>> {
    let mut first = blocks.partition_point(|b| b.enclosing_range.end <= range.start);
    if first == blocks.len() && first > 0 && touches(&blocks[first - 1], range) {
        first -= 1;
    }

    let mut end = first;
    while end < blocks.len() && touches(&blocks[end], range) {
        end += 1;
    }

    (end > first).then_some(first..end)
}

/// What an edit invalidates, expressed against the new buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalidation {
    /// Old blocks to be replaced. May extend past the affected span when the
    /// edit removed a line break.
    pub blocks: Option<Range<usize>>,
    /// Line-aligned range of the new buffer to hand to the parser. Empty when
    /// the affected blocks were deleted outright.
    pub text: Span,
}

/// Computes the text range to re-parse after `edit` has been applied.
///
/// `blocks` is the pre-edit block list and `affected` the result of
/// [`affected_block_span`] for the same edit. `text` and `len` describe the
/// buffer after the edit.
pub fn reparse_range(
    blocks: &[Block],
    affected: Option<Range<usize>>,
    edit: &Edit,
    text: &Rope,
    len: usize,
    anchor: Anchor,
) -> Invalidation {
    let delta = edit.delta();
    let moved = |offset: usize| {
        offset
            .checked_add_signed(delta)
            .unwrap_or_else(|| panic!("offset {offset} moved by {delta} leaves the buffer"))
    };

    let Some(mut span) = affected else {
        let start = edit.range.start;
        return Invalidation {
            blocks: None,
            text: Span::new(start, start + edit.inserted_len()),
        };
    };

    let start = blocks[span.start].enclosing_range.start;
    let mut end = moved(blocks[span.end - 1].enclosing_range.end);

    // A deleted line break joins the following line to the edited one.
    while !is_line_boundary(text, anchor, len, end) {
        let next = &blocks[span.end];
        end = moved(next.enclosing_range.end);
        span.end += 1;
        log::trace!("widened re-parse span to block {}", span.end - 1);
    }

    Invalidation {
        blocks: Some(span),
        text: Span::new(start, end),
    }
}
