use xi_rope::Rope;

use crate::parsing::{blocks::Block, rope::char_len};

/// Validates block list invariants against the buffer.
///
/// Asserts that:
/// - Each block's `range` and `content_range` sit inside its `enclosing_range`
/// - Only the terminator separates `range` from `enclosing_range`
/// - Enclosing ranges are contiguous, ordered and cover `[0, len)` exactly
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(rope: &Rope, blocks: &[Block]) {
    check_coverage(blocks, 0, char_len(rope));
}

/// Validates that `blocks` tile `[start, end)` with non-empty lines.
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check_coverage(blocks: &[Block], start: usize, end: usize) {
    let mut cursor = start;
    for (i, b) in blocks.iter().enumerate() {
        let enclosing = b.enclosing_range;
        assert!(
            enclosing.start == cursor,
            "block {i} starts at {} but the previous block ended at {cursor}",
            enclosing.start
        );
        assert!(!enclosing.is_empty(), "block {i} is empty: {enclosing:?}");
        assert!(
            b.range.start == enclosing.start
                && b.range.end <= enclosing.end
                && enclosing.end - b.range.end <= 1,
            "block {i} range {:?} does not match enclosing range {enclosing:?}",
            b.range
        );
        assert!(
            b.content_range.start >= enclosing.start
                && b.content_range.start <= b.content_range.end
                && b.content_range.end <= b.range.end,
            "content range not contained in block {i}: content {:?}, block {:?}",
            b.content_range,
            b.range
        );
        cursor = enclosing.end;
    }
    assert!(
        cursor == end,
        "blocks cover {start}..{cursor} but the range is {start}..{end}"
    );
}
