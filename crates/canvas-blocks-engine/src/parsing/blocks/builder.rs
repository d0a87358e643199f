use crate::parsing::rope::span::Span;

use super::{
    classify::LineClass,
    containers::ContainerPath,
    open::try_open_leaf,
    types::{Block, BlockKind},
};

/// Turns classified lines into blocks, one block per line.
pub struct BlockBuilder {
    containers: ContainerPath,
    out: Vec<Block>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            containers: ContainerPath::default(),
            out: vec![],
        }
    }

    pub fn push(&mut self, c: &LineClass) {
        self.containers.set_blockquote_depth(c.quote_depth);

        let range = Span {
            start: c.line.start,
            end: c.line.end - usize::from(c.terminated),
        };

        let (kind, content_range) = if c.is_blank {
            (BlockKind::Blank, Span::empty(c.remainder_span.end))
        } else if let Some(open) = try_open_leaf(&c.remainder_text, c.indent) {
            let content_start = if open.kind == BlockKind::ThematicBreak {
                c.remainder_span.start
            } else {
                c.remainder_span.start + c.indent + open.marker_len
            };
            (
                open.kind,
                Span {
                    start: content_start.min(c.remainder_span.end),
                    end: c.remainder_span.end,
                },
            )
        } else {
            (BlockKind::Paragraph, c.remainder_span)
        };

        self.out.push(Block {
            containers: self.containers.0.clone(),
            kind,
            range,
            enclosing_range: c.line,
            content_range,
        });
    }

    pub fn finish(self) -> Vec<Block> {
        self.out
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}
