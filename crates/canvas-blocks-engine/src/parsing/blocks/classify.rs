use crate::parsing::rope::{lines::LineRef, span::Span};

use super::kinds::BlockQuote;

/// Classification of a single line containing only local facts.
///
/// Every line is classified independently, without reference to its
/// neighbours. That independence is what lets the controller re-parse any
/// line-aligned slice of the buffer and get the same blocks a full parse
/// would produce.
#[derive(Debug, Clone)]
pub struct LineClass {
    /// Full character span of this line, terminator included.
    pub line: Span,
    /// Whether the line owns a trailing `\n`.
    pub terminated: bool,
    /// Whether the line is blank (whitespace only after stripping prefixes).
    pub is_blank: bool,
    /// Number of blockquote `>` prefixes found.
    pub quote_depth: u8,
    /// Character span of the line content after stripping quote prefixes,
    /// excluding the line terminator.
    pub remainder_span: Span,
    /// Text content after stripping prefixes.
    pub remainder_text: String,
    /// Leading spaces and tabs of the remainder, in characters.
    pub indent: usize,
}

/// Classifies individual lines for block parsing.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line into a [`LineClass`] containing local facts.
    ///
    /// Extracts blockquote depth, remainder span, indentation and blank status.
    pub fn classify(&self, lr: &LineRef) -> LineClass {
        let trimmed = lr.text.trim_end_matches(['\r', '\n']);

        let (qd, idx) = BlockQuote::strip_prefixes(trimmed);
        let remainder = &trimmed[idx..];
        let prefix_chars = trimmed[..idx].chars().count();
        let remainder_span = Span {
            start: lr.span.start + prefix_chars,
            end: lr.span.start + prefix_chars + remainder.chars().count(),
        };

        LineClass {
            line: lr.span,
            terminated: lr.is_terminated(),
            is_blank: remainder.trim().is_empty(),
            quote_depth: qd,
            remainder_span,
            remainder_text: remainder.to_string(),
            indent: remainder
                .chars()
                .take_while(|&c| c == ' ' || c == '\t')
                .count(),
        }
    }
}
