//! Tests for the reference line parser.

use pretty_assertions::assert_eq;
use xi_rope::Rope;

use crate::parsing::{
    BlockParser, LineParser,
    blocks::{BlockKind, Marker},
    parse_document,
    rope::{Span, slice_to_string},
    snapshot,
};

fn kinds(text: &str) -> Vec<BlockKind> {
    let rope = Rope::from(text);
    let doc = parse_document(&rope);
    snapshot::invariants(&rope, &doc.blocks);
    doc.blocks.into_iter().map(|b| b.kind).collect()
}

/// Test that slicing any span from the rope reproduces exact text.
#[test]
fn lossless_span_invariant() {
    let md = "# Head\n\n- item\n> quote\nplain";
    let rope = Rope::from(md);

    let doc = parse_document(&rope);

    let rebuilt: String = doc
        .blocks
        .iter()
        .map(|b| slice_to_string(&rope, b.enclosing_range))
        .collect();
    assert_eq!(rebuilt, md);
}

#[test]
fn one_block_per_line() {
    assert_eq!(
        kinds("# Title\n\nBody text"),
        vec![
            BlockKind::Heading { level: 1 },
            BlockKind::Blank,
            BlockKind::Paragraph
        ]
    );
}

#[test]
fn mixed_document() {
    assert_eq!(
        kinds("- a\n  - b\n1. c\n- [ ] d\n***\n"),
        vec![
            BlockKind::ListItem {
                marker: Marker::Dash,
                indent: 0
            },
            BlockKind::ListItem {
                marker: Marker::Dash,
                indent: 2
            },
            BlockKind::ListItem {
                marker: Marker::Numbered,
                indent: 0
            },
            BlockKind::Checklist {
                checked: false,
                indent: 0
            },
            BlockKind::ThematicBreak,
        ]
    );
}

/// Test empty document produces no blocks.
#[test]
fn empty_document() {
    let rope = Rope::from("");
    let doc = parse_document(&rope);
    assert!(doc.blocks.is_empty());
}

/// Blank lines are blocks of their own; a trailing newline adds no block.
#[test]
fn blank_lines_only() {
    assert_eq!(
        kinds("\n\n\n"),
        vec![BlockKind::Blank, BlockKind::Blank, BlockKind::Blank]
    );
}

#[test]
fn partial_parse_matches_full_parse() {
    let rope = Rope::from("# A\nbody\n- item\n\nlast");
    let full = parse_document(&rope).blocks;
    let partial = LineParser.parse(&rope, Span::new(4, 17));
    assert_eq!(partial, full[1..4].to_vec());
}

#[test]
fn closures_are_parsers() {
    let rope = Rope::from("a\nb");
    let calls = std::cell::Cell::new(0);
    let counting = |text: &Rope, range: Span| {
        calls.set(calls.get() + 1);
        LineParser.parse(text, range)
    };
    assert_eq!(counting.parse(&rope, Span::new(2, 3)).len(), 1);
    assert_eq!(calls.get(), 1);
}
