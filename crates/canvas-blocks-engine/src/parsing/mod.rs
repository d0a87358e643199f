pub mod blocks;
pub mod rope;
pub mod snapshot;

#[cfg(test)]
mod tests;

use xi_rope::Rope;

use blocks::{Block, BlockBuilder, MarkdownLineClassifier};
use rope::{Span, lines_in};

/// Produces blocks for a line-aligned range of a buffer.
///
/// Implementations must be pure: no side effects and no state carried
/// between calls. The returned blocks must cover `range` exactly, in order,
/// with no gaps or overlaps.
pub trait BlockParser {
    fn parse(&self, text: &Rope, range: Span) -> Vec<Block>;
}

impl<F> BlockParser for F
where
    F: Fn(&Rope, Span) -> Vec<Block>,
{
    fn parse(&self, text: &Rope, range: Span) -> Vec<Block> {
        self(text, range)
    }
}

/// Reference grammar: one block per line, classified by its prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineParser;

impl BlockParser for LineParser {
    fn parse(&self, text: &Rope, range: Span) -> Vec<Block> {
        let classifier = MarkdownLineClassifier;
        let mut builder = BlockBuilder::new();

        for lr in lines_in(text, range) {
            let lc = classifier.classify(&lr);
            builder.push(&lc);
        }

        builder.finish()
    }
}

#[derive(Debug)]
pub struct ParsedDoc {
    pub blocks: Vec<Block>,
}

/// Parses the whole buffer with the reference grammar.
pub fn parse_document(rope: &Rope) -> ParsedDoc {
    ParsedDoc {
        blocks: LineParser.parse(rope, Span::new(0, rope::char_len(rope))),
    }
}
