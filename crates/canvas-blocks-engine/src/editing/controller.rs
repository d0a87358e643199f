use std::ops::Range;

use xi_rope::{Rope, delta::Builder};

use crate::{
    editing::{
        patch::{ChangeEvent, Patch},
        reconciler::Reconciler,
        resolver::{self, Edit},
    },
    parsing::{
        BlockParser, LineParser,
        blocks::Block,
        rope::{Anchor, Span, byte_range_from, char_len, char_to_byte_from},
        snapshot::check_coverage,
    },
};

/// Behaviour switches for a [`Controller`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ControllerOptions {
    /// Rewrite `"\n…"` inserted before an existing line break into `"…\n"`
    /// inserted after it, so the preceding line is not re-parsed.
    pub normalize_block_breaks: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            normalize_block_breaks: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("edit range {range} is outside the buffer of length {len}")]
    RangeOutOfBounds { range: Span, len: usize },
    #[error("document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Owns a text buffer and keeps its block list in sync with it.
///
/// Every edit goes through [`Controller::replace_characters`], which
/// re-parses only the lines the edit touched and returns a [`Patch`]
/// describing how the block list changed. Offsets are in characters.
///
/// ```
/// use canvas_blocks_engine::editing::Controller;
/// use canvas_blocks_engine::parsing::rope::Span;
///
/// let mut doc = Controller::new("# Title\n\nBody text");
/// let patch = doc.replace_characters(Span::new(9, 18), "Changed");
///
/// assert_eq!(doc.text(), "# Title\n\nChanged");
/// assert_eq!(patch.changes().count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Controller<P: BlockParser = LineParser> {
    buffer: Rope,
    /// Buffer length in characters.
    len: usize,
    blocks: Vec<Block>,
    /// Byte offset of each block's first character, parallel to `blocks`.
    starts: Vec<usize>,
    parser: P,
    options: ControllerOptions,
    version: u64,
}

impl Controller<LineParser> {
    /// A controller over `text` using the reference line grammar.
    pub fn new(text: &str) -> Self {
        Self::with_parser(LineParser, ControllerOptions::default(), text)
    }

    pub fn with_options(options: ControllerOptions, text: &str) -> Self {
        Self::with_parser(LineParser, options, text)
    }

    /// Create a controller from raw bytes, which must be valid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ControllerError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }
}

impl<P: BlockParser> Controller<P> {
    /// A controller with a custom parser.
    ///
    /// The initial text is loaded as a single insertion into an empty
    /// buffer, so the parser sees exactly what it would for any other edit.
    /// The version counter starts at zero afterwards.
    pub fn with_parser(parser: P, options: ControllerOptions, text: &str) -> Self {
        let mut controller = Self {
            buffer: Rope::from(""),
            len: 0,
            blocks: Vec::new(),
            starts: Vec::new(),
            parser,
            options,
            version: 0,
        };
        if !text.is_empty() {
            controller.replace_characters(Span::empty(0), text);
        }
        controller.version = 0;
        controller
    }

    /// Replaces the characters in `range` with `replacement`.
    ///
    /// # Panics
    /// Panics if `range` is reversed or ends past the buffer. Use
    /// [`Controller::try_replace_characters`] for unvalidated input.
    pub fn replace_characters(&mut self, range: Span, replacement: &str) -> Patch {
        assert!(
            range.start <= range.end && range.end <= self.len,
            "edit range {range} is outside the buffer of length {}",
            self.len
        );

        let mut events = vec![ChangeEvent::WillUpdate];

        let anchor = self.anchor_before(range.start);
        let mut edit = Edit::new(range, replacement);
        if self.options.normalize_block_breaks {
            edit = resolver::normalize(edit, &self.buffer, anchor);
        }
        let affected = resolver::affected_block_span(&self.blocks, edit.range);

        let old_text = self.buffer.clone();
        let mut builder = Builder::new(self.buffer.len());
        builder.replace(
            byte_range_from(&self.buffer, anchor, edit.range),
            Rope::from(edit.replacement.as_str()),
        );
        self.buffer = builder.build().apply(&self.buffer);
        self.len = self.len - edit.range.len() + edit.inserted_len();
        debug_assert_eq!(self.len, char_len(&self.buffer));

        let invalidation = resolver::reparse_range(
            &self.blocks,
            affected,
            &edit,
            &self.buffer,
            self.len,
            anchor,
        );
        let fresh = if invalidation.text.is_empty() {
            Vec::new()
        } else {
            self.parser.parse(&self.buffer, invalidation.text)
        };
        if cfg!(debug_assertions) {
            check_coverage(&fresh, invalidation.text.start, invalidation.text.end);
        }

        log::debug!(
            "edit {} (+{} chars): blocks {:?}, re-parse {}, {} fresh blocks",
            edit.range,
            edit.inserted_len(),
            invalidation.blocks,
            invalidation.text,
            fresh.len()
        );

        let replaced = invalidation
            .blocks
            .clone()
            .unwrap_or(self.blocks.len()..self.blocks.len());
        let byte_delta = self.buffer.len() as isize - old_text.len() as isize;
        let starts = self.spliced_starts(replaced, &fresh, anchor, byte_delta);

        let reconciliation = Reconciler {
            old_text: &old_text,
            new_text: &self.buffer,
            anchor,
        }
        .reconcile(&self.blocks, invalidation.blocks, self.blocks.len(), fresh);
        self.blocks = reconciliation.blocks;
        self.starts = starts;
        debug_assert_eq!(self.starts.len(), self.blocks.len());
        events.extend(reconciliation.events);
        events.push(ChangeEvent::DidUpdate);
        self.version += 1;

        Patch {
            events,
            reparsed: (!invalidation.text.is_empty()).then_some(invalidation.text),
            version: self.version,
        }
    }

    /// Byte starts of the block list once `replaced` has been swapped for
    /// `fresh`. Must be called after the buffer holds the edited text.
    fn spliced_starts(
        &self,
        replaced: Range<usize>,
        fresh: &[Block],
        anchor: Anchor,
        byte_delta: isize,
    ) -> Vec<usize> {
        let mut starts = Vec::with_capacity(self.starts.len() - replaced.len() + fresh.len());
        starts.extend_from_slice(&self.starts[..replaced.start]);
        let mut walk = anchor;
        for block in fresh {
            let bytes = char_to_byte_from(&self.buffer, walk, block.enclosing_range.start);
            walk = Anchor {
                chars: block.enclosing_range.start,
                bytes,
            };
            starts.push(bytes);
        }
        starts.extend(self.starts[replaced.end..].iter().map(|&bytes| {
            bytes
                .checked_add_signed(byte_delta)
                .unwrap_or_else(|| panic!("block start {bytes} moved by {byte_delta} bytes"))
        }));
        starts
    }

    /// Like [`Controller::replace_characters`] but reports a bad range as an
    /// error instead of panicking.
    pub fn try_replace_characters(
        &mut self,
        range: Span,
        replacement: &str,
    ) -> Result<Patch, ControllerError> {
        if range.start > range.end || range.end > self.len {
            return Err(ControllerError::RangeOutOfBounds {
                range,
                len: self.len,
            });
        }
        Ok(self.replace_characters(range, replacement))
    }

    /// The whole buffer as a string.
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn rope(&self) -> &Rope {
        &self.buffer
    }

    /// Buffer length in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of edits applied since construction.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn options(&self) -> ControllerOptions {
        self.options
    }

    /// Start of the block preceding the one that holds `offset`. Every block
    /// an edit at `offset` can touch begins at or after it.
    fn anchor_before(&self, offset: usize) -> Anchor {
        let idx = self
            .blocks
            .partition_point(|b| b.enclosing_range.end <= offset)
            .saturating_sub(1);
        match (self.blocks.get(idx), self.starts.get(idx)) {
            (Some(block), Some(&bytes)) => Anchor {
                chars: block.enclosing_range.start,
                bytes,
            },
            _ => Anchor::START,
        }
    }

    fn slice(&self, span: Span) -> String {
        let anchor = self.anchor_before(span.start);
        self.buffer
            .slice_to_cow(byte_range_from(&self.buffer, anchor, span))
            .into_owned()
    }

    /// The block whose enclosing range contains `offset`.
    pub fn block_at(&self, offset: usize) -> Option<&Block> {
        let idx = self
            .blocks
            .partition_point(|b| b.enclosing_range.end <= offset);
        self.blocks
            .get(idx)
            .filter(|b| b.enclosing_range.contains(offset))
    }

    /// Text of the block's line, without its terminator.
    pub fn block_text(&self, block: &Block) -> String {
        self.slice(block.range)
    }

    /// Text of the block's semantic payload.
    pub fn content_text(&self, block: &Block) -> String {
        self.slice(block.content_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{blocks::BlockKind, parse_document, rope::char_to_byte, snapshot};
    use pretty_assertions::assert_eq;

    #[test]
    fn from_bytes_valid_utf8() {
        let doc = Controller::from_bytes(b"# Hello\n\nWorld").unwrap();
        assert_eq!(doc.text(), "# Hello\n\nWorld");
        assert_eq!(doc.version(), 0);
        assert_eq!(doc.blocks().len(), 3);
    }

    #[test]
    fn from_bytes_invalid_utf8() {
        let result = Controller::from_bytes(&[0xFF, 0xFE, 0xFD]);
        assert!(matches!(result, Err(ControllerError::InvalidUtf8(_))));
    }

    #[test]
    fn empty_controller_has_no_blocks() {
        let doc = Controller::new("");
        assert!(doc.is_empty());
        assert!(doc.blocks().is_empty());
    }

    #[test]
    fn seeded_blocks_match_full_parse() {
        let text = "# Title\n\n- a\n- [x] b\n> quoted\n---\ntail";
        let doc = Controller::new(text);
        assert_eq!(doc.blocks(), parse_document(&Rope::from(text)).blocks);
    }

    #[test]
    fn version_counts_edits() {
        let mut doc = Controller::new("A");
        let first = doc.replace_characters(Span::empty(1), "B");
        let second = doc.replace_characters(Span::empty(0), "C");
        assert_eq!((first.version, second.version, doc.version()), (1, 2, 2));
    }

    #[test]
    fn events_are_bracketed() {
        let mut doc = Controller::new("A\nB");
        let patch = doc.replace_characters(Span::new(0, 1), "X");
        assert_eq!(patch.events.first(), Some(&ChangeEvent::WillUpdate));
        assert_eq!(patch.events.last(), Some(&ChangeEvent::DidUpdate));
        assert_eq!(patch.reparsed, Some(Span::new(0, 2)));
    }

    #[test]
    fn whole_block_deletion_skips_parse() {
        let mut doc = Controller::new("A\nB\nC");
        let patch = doc.replace_characters(Span::new(2, 4), "");
        assert_eq!(patch.reparsed, None);
        assert_eq!(doc.text(), "A\nC");
        snapshot::invariants(doc.rope(), doc.blocks());
    }

    #[test]
    #[should_panic(expected = "outside the buffer")]
    fn out_of_range_edit_panics() {
        let mut doc = Controller::new("abc");
        doc.replace_characters(Span::new(2, 4), "");
    }

    #[test]
    fn try_replace_rejects_bad_ranges() {
        let mut doc = Controller::new("abc");
        let err = doc.try_replace_characters(Span::new(2, 9), "x").unwrap_err();
        assert_eq!(err.to_string(), "edit range 2..9 is outside the buffer of length 3");
        assert!(doc.try_replace_characters(Span::new(3, 1), "").is_err());
        assert_eq!(doc.text(), "abc");
        assert_eq!(doc.version(), 0);
    }

    #[test]
    fn block_lookup_and_text() {
        let doc = Controller::new("# Title\n- item\nbody");
        let heading = doc.block_at(3).unwrap();
        assert_eq!(heading.kind, BlockKind::Heading { level: 1 });
        assert_eq!(doc.block_text(heading), "# Title");
        assert_eq!(doc.content_text(heading), "Title");

        let item = doc.block_at(8).unwrap();
        assert_eq!(doc.content_text(item), "item");
        assert_eq!(doc.block_at(19).map(|b| doc.block_text(b)), None);
        assert_eq!(doc.block_at(17).map(|b| doc.block_text(b)), Some("body".to_string()));
    }

    #[test]
    fn block_starts_follow_multibyte_edits() {
        let mut doc = Controller::new("é\n世界\nz\n🦀🦀\nend");
        doc.replace_characters(Span::new(2, 3), "ü");
        doc.replace_characters(Span::empty(0), "ß\n");
        doc.replace_characters(Span::new(5, 6), "");

        assert_eq!(doc.text(), "ß\né\nü\nz\n🦀🦀\nend");
        let expected: Vec<_> = doc
            .blocks()
            .iter()
            .map(|b| char_to_byte(doc.rope(), b.enclosing_range.start))
            .collect();
        assert_eq!(doc.starts, expected);
        let texts: Vec<_> = doc.blocks().iter().map(|b| doc.block_text(b)).collect();
        assert_eq!(texts, vec!["ß", "é", "ü", "z", "🦀🦀", "end"]);
    }

    #[test]
    fn custom_parser_is_used() {
        let calls = std::cell::Cell::new(0);
        let parser = |rope: &Rope, range: Span| {
            calls.set(calls.get() + 1);
            LineParser.parse(rope, range)
        };
        let mut doc = Controller::with_parser(parser, ControllerOptions::default(), "A\nB");
        doc.replace_characters(Span::empty(3), "C");
        assert_eq!(calls.get(), 2);
        assert_eq!(doc.text(), "A\nBC");
    }
}
