/// ATX heading with owned delimiter knowledge.
pub struct Heading;

impl Heading {
    pub const PREFIX: char = '#';
    pub const MAX_LEVEL: usize = 6;

    /// Detects a heading opener at the start of `rest`.
    ///
    /// Returns `(level, marker_len)` where `marker_len` counts the `#`s and
    /// the single separating space, if present.
    pub fn open(rest: &str) -> Option<(u8, usize)> {
        let hashes = rest.chars().take_while(|&c| c == Self::PREFIX).count();
        if hashes == 0 || hashes > Self::MAX_LEVEL {
            return None;
        }
        match rest[hashes..].chars().next() {
            None => Some((hashes as u8, hashes)),
            Some(' ' | '\t') => Some((hashes as u8, hashes + 1)),
            Some(_) => None,
        }
    }
}
