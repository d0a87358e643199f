use xi_rope::Rope;

use super::{offsets::byte_range, span::Span};

/// A reference to a single line in the rope with its character span.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// Character span of this line in the rope (includes newline if present).
    pub span: Span,
    /// The line text, terminator included.
    pub text: String,
}

impl LineRef {
    /// Whether the line owns a trailing `\n`.
    pub fn is_terminated(&self) -> bool {
        self.text.ends_with('\n')
    }
}

/// Returns an iterator over the lines of `span` with their character spans.
///
/// Uses `lines_raw` to preserve newline characters, which is important for
/// accurate span tracking during block parsing. `span` should start on a
/// line boundary; otherwise the first item is a partial line.
pub fn lines_in(rope: &Rope, span: Span) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = span.start;
    rope.lines_raw(byte_range(rope, span)).map(move |line| {
        let start = offset;
        offset += line.chars().count();
        LineRef {
            span: Span { start, end: offset },
            text: line.into_owned(),
        }
    })
}
