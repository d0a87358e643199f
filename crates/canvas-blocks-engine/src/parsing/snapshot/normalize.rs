use std::fmt::Write;

use xi_rope::Rope;

use crate::parsing::{
    blocks::{Block, ContainerFrame},
    rope::slice::preview,
};

/// Width of the text preview in a rendered block line.
pub const PREVIEW_WIDTH: usize = 60;

/// One line per block: `index kind enclosing-range containers text`.
///
/// The format is stable so it can back text snapshots and CLI output.
pub fn render_block(rope: &Rope, index: usize, b: &Block, width: usize) -> String {
    let mut line = format!("{index} {} {}", b.kind.label(), b.enclosing_range);
    for frame in &b.containers {
        match frame {
            ContainerFrame::BlockQuote { depth } => {
                let _ = write!(line, " Quote({depth})");
            }
        }
    }
    let _ = write!(line, " {:?}", preview(rope, b.enclosing_range, width));
    line
}

/// Renders a whole block list, one block per line.
pub fn normalize(rope: &Rope, blocks: &[Block]) -> String {
    blocks
        .iter()
        .enumerate()
        .map(|(i, b)| render_block(rope, i, b, PREVIEW_WIDTH))
        .collect::<Vec<_>>()
        .join("\n")
}
