/// A character range `[start, end)` into the buffer.
///
/// Offsets count Unicode scalar values, not UTF-8 bytes, so a span stays
/// meaningful to hosts that index text by character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct Span {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// An empty span positioned at `at`.
    pub const fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Returns the length in characters. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// True when both spans share at least one character.
    #[must_use]
    pub fn intersects(self, other: Span) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }

    #[must_use]
    pub fn contains(self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Translates the span by `delta` characters.
    ///
    /// # Panics
    /// Panics if either bound would become negative.
    #[must_use]
    pub fn shifted(self, delta: isize) -> Self {
        let shift = |offset: usize| {
            offset
                .checked_add_signed(delta)
                .unwrap_or_else(|| panic!("span {self:?} shifted by {delta} leaves the buffer"))
        };
        Self {
            start: shift(self.start),
            end: shift(self.end),
        }
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
