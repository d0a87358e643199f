//! Splices freshly parsed blocks into the block list and describes the
//! splice as an ordered list of [`ChangeEvent`]s.

use std::ops::Range;

use xi_rope::Rope;

use crate::{
    editing::patch::ChangeEvent,
    parsing::{
        blocks::Block,
        rope::{Anchor, byte_range_from},
    },
};

/// The new block list together with the events that produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub blocks: Vec<Block>,
    pub events: Vec<ChangeEvent>,
}

/// Buffers on both sides of an edit, used to compare block text.
pub struct Reconciler<'a> {
    pub old_text: &'a Rope,
    pub new_text: &'a Rope,
    /// Position at or before the first re-parsed block, valid in both buffers.
    pub anchor: Anchor,
}

/// Sum of line lengths, terminators excluded.
fn total_length(blocks: &[Block]) -> usize {
    blocks.iter().map(|b| b.range.len()).sum()
}

fn enclosing_length(blocks: &[Block]) -> usize {
    blocks.iter().map(|b| b.enclosing_range.len()).sum()
}

impl Reconciler<'_> {
    fn same_text(&self, before: &Block, after: &Block) -> bool {
        before.range.len() == after.range.len()
            && self
                .old_text
                .slice_to_cow(byte_range_from(self.old_text, self.anchor, before.range))
                == self
                    .new_text
                    .slice_to_cow(byte_range_from(self.new_text, self.anchor, after.range))
    }

    /// Replaces `old[span]` with `new_blocks`.
    ///
    /// `span` is `None` when the edit touched no block; the new blocks are
    /// then inserted at `insert_at`. Blocks after the span are shifted to
    /// their new positions and each is reported with a `Relocate`.
    ///
    /// # Panics
    /// Panics if the span or the insertion index is out of bounds.
    pub fn reconcile(
        &self,
        old: &[Block],
        span: Option<Range<usize>>,
        insert_at: usize,
        new_blocks: Vec<Block>,
    ) -> Reconciliation {
        let span = span.unwrap_or(insert_at..insert_at);
        let loc = span.start;
        let updated = &old[span.clone()];
        let trailing = &old[span.end..];
        let delta = new_blocks.len() as isize - updated.len() as isize;
        let inserted = delta.max(0) as usize;
        let removed = (-delta).max(0) as usize;

        let after_offset =
            total_length(&new_blocks) as isize - total_length(updated) as isize + delta;
        if !trailing.is_empty() {
            debug_assert_eq!(
                after_offset,
                enclosing_length(&new_blocks) as isize - enclosing_length(updated) as isize,
                "re-parsed blocks must own a terminator when followed by other blocks"
            );
        }

        let mut blocks = Vec::with_capacity(old.len() - updated.len() + new_blocks.len());
        let mut events = Vec::new();
        blocks.extend_from_slice(&old[..loc]);

        for (i, block) in new_blocks.iter().take(inserted).enumerate() {
            log::trace!("insert {} at {}", block.kind.label(), loc + i);
            events.push(ChangeEvent::Insert {
                block: block.clone(),
                index: loc + i,
            });
            blocks.push(block.clone());
        }

        for block in &updated[..removed] {
            log::trace!("remove {} at {loc}", block.kind.label());
            events.push(ChangeEvent::Remove {
                block: block.clone(),
                index: loc,
            });
        }

        for (k, (after, before)) in new_blocks[inserted..]
            .iter()
            .zip(&updated[removed..])
            .enumerate()
        {
            let index = loc + inserted + k;
            if !before.same_kind(after) {
                log::trace!(
                    "kind change at {index}: {} -> {}",
                    before.kind.label(),
                    after.kind.label()
                );
                events.push(ChangeEvent::Remove {
                    block: before.clone(),
                    index,
                });
                events.push(ChangeEvent::Insert {
                    block: after.clone(),
                    index,
                });
            } else if before.kind != after.kind
                || before.containers != after.containers
                || !self.same_text(before, after)
            {
                events.push(ChangeEvent::ReplaceContent {
                    before: before.clone(),
                    index,
                    after: after.clone(),
                });
            } else if before != after {
                events.push(ChangeEvent::Relocate {
                    before: before.clone(),
                    index,
                    after: after.clone(),
                });
            }
            blocks.push(after.clone());
        }

        for before in trailing {
            let after = before.shifted(after_offset);
            events.push(ChangeEvent::Relocate {
                before: before.clone(),
                index: blocks.len(),
                after: after.clone(),
            });
            blocks.push(after);
        }

        Reconciliation { blocks, events }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{
        blocks::BlockKind,
        parse_document,
        rope::Span,
        BlockParser, LineParser,
    };
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> (Rope, Vec<Block>) {
        let rope = Rope::from(text);
        let blocks = parse_document(&rope).blocks;
        (rope, blocks)
    }

    fn names(events: &[ChangeEvent]) -> Vec<String> {
        events.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn replaced_line_reports_content_change() {
        let (old_rope, old) = parse("# Title\n\nBody text");
        let new_rope = Rope::from("# Title\n\nChanged");
        let fresh = LineParser.parse(&new_rope, Span::new(9, 16));

        let rec = Reconciler {
            old_text: &old_rope,
            new_text: &new_rope,
            anchor: Anchor::START,
        }
        .reconcile(&old, Some(2..3), 3, fresh);

        assert_eq!(names(&rec.events), vec!["replace 2 Paragraph 9..18 -> Paragraph 9..16"]);
        assert_eq!(rec.blocks, parse_document(&new_rope).blocks);
    }

    #[test]
    fn inserted_line_shifts_trailing_blocks() {
        let (old_rope, old) = parse("A\nB\nC");
        let new_rope = Rope::from("A\nX\nB\nC");
        let fresh = LineParser.parse(&new_rope, Span::new(2, 6));

        let rec = Reconciler {
            old_text: &old_rope,
            new_text: &new_rope,
            anchor: Anchor::START,
        }
        .reconcile(&old, Some(1..2), 3, fresh);

        assert_eq!(
            names(&rec.events),
            vec![
                "insert 1 Paragraph 2..4",
                "relocate 2 Paragraph 2..4 -> 4..6",
                "relocate 3 Paragraph 4..5 -> 6..7",
            ]
        );
        assert_eq!(rec.blocks, parse_document(&new_rope).blocks);
    }

    #[test]
    fn removed_block_reports_at_span_start() {
        let (old_rope, old) = parse("A\nB\nC\nD");
        let new_rope = Rope::from("A\nD");

        let rec = Reconciler {
            old_text: &old_rope,
            new_text: &new_rope,
            anchor: Anchor::START,
        }
        .reconcile(&old, Some(1..3), 4, Vec::new());

        assert_eq!(
            names(&rec.events),
            vec![
                "remove 1 Paragraph 2..4",
                "remove 1 Paragraph 4..6",
                "relocate 1 Paragraph 6..7 -> 2..3",
            ]
        );
        assert_eq!(rec.blocks, parse_document(&new_rope).blocks);
    }

    #[test]
    fn kind_change_is_remove_then_insert() {
        let (old_rope, old) = parse("A\nB");
        let new_rope = Rope::from("# A\nB");
        let fresh = LineParser.parse(&new_rope, Span::new(0, 4));

        let rec = Reconciler {
            old_text: &old_rope,
            new_text: &new_rope,
            anchor: Anchor::START,
        }
        .reconcile(&old, Some(0..1), 2, fresh);

        assert_eq!(
            names(&rec.events),
            vec![
                "remove 0 Paragraph 0..2",
                "insert 0 Heading(1) 0..4",
                "relocate 1 Paragraph 2..3 -> 4..5",
            ]
        );
    }

    #[test]
    fn heading_level_change_is_content_change() {
        let (old_rope, old) = parse("# A");
        let new_rope = Rope::from("## A");
        let fresh = LineParser.parse(&new_rope, Span::new(0, 4));

        let rec = Reconciler {
            old_text: &old_rope,
            new_text: &new_rope,
            anchor: Anchor::START,
        }
        .reconcile(&old, Some(0..1), 1, fresh);

        assert!(matches!(
            rec.events.as_slice(),
            [ChangeEvent::ReplaceContent { after, .. }] if after.kind == BlockKind::Heading { level: 2 }
        ));
    }

    #[test]
    fn identical_blocks_are_silent() {
        let (rope, old) = parse("A\nB");
        let fresh = LineParser.parse(&rope, Span::new(0, 2));

        let rec = Reconciler {
            old_text: &rope,
            new_text: &rope,
            anchor: Anchor::START,
        }
        .reconcile(&old, Some(0..1), 2, fresh);

        assert_eq!(names(&rec.events), vec!["relocate 1 Paragraph 2..3 -> 2..3"]);
        assert_eq!(rec.blocks, old);
    }

    #[test]
    fn no_span_appends_at_insertion_index() {
        let (old_rope, old) = parse("A\n");
        let new_rope = Rope::from("A\nB");
        let fresh = LineParser.parse(&new_rope, Span::new(2, 3));

        let rec = Reconciler {
            old_text: &old_rope,
            new_text: &new_rope,
            anchor: Anchor::START,
        }
        .reconcile(&old, None, old.len(), fresh);

        assert_eq!(names(&rec.events), vec!["insert 1 Paragraph 2..3"]);
        assert_eq!(rec.blocks.len(), 2);
    }
}
