use crate::parsing::blocks::types::Marker;

/// Bullet and numbered list items, plus the task-list variant.
pub struct ListItem;

impl ListItem {
    const MAX_ORDINAL_DIGITS: usize = 9;

    /// Detects a list marker at the start of `rest`.
    ///
    /// Returns the marker and its length including one trailing space.
    pub fn open(rest: &str) -> Option<(Marker, usize)> {
        let mut chars = rest.chars();
        let marker = match chars.next()? {
            '-' => Marker::Dash,
            '*' => Marker::Asterisk,
            '+' => Marker::Plus,
            c if c.is_ascii_digit() => return Self::open_numbered(rest),
            _ => return None,
        };
        Self::after_marker(&rest[1..]).map(|space| (marker, 1 + space))
    }

    /// Detects `- [ ]` / `- [x]` at the start of `rest`.
    ///
    /// Returns `(checked, marker_len)`.
    pub fn open_checklist(rest: &str) -> Option<(bool, usize)> {
        let (marker, len) = Self::open(rest)?;
        if marker == Marker::Numbered || len != 2 {
            return None;
        }
        let b = rest.as_bytes();
        if b.len() < 5 || b[2] != b'[' || b[4] != b']' {
            return None;
        }
        let checked = match b[3] {
            b' ' => false,
            b'x' | b'X' => true,
            _ => return None,
        };
        Self::after_marker(&rest[5..]).map(|space| (checked, 5 + space))
    }

    fn open_numbered(rest: &str) -> Option<(Marker, usize)> {
        let digits = rest.chars().take_while(char::is_ascii_digit).count();
        if digits > Self::MAX_ORDINAL_DIGITS {
            return None;
        }
        match rest[digits..].chars().next()? {
            '.' | ')' => {}
            _ => return None,
        }
        Self::after_marker(&rest[digits + 1..]).map(|space| (Marker::Numbered, digits + 1 + space))
    }

    /// A marker must be followed by a space or end the line.
    fn after_marker(tail: &str) -> Option<usize> {
        match tail.chars().next() {
            None => Some(0),
            Some(' ' | '\t') => Some(1),
            Some(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("- item", Some((Marker::Dash, 2)))]
    #[case("* item", Some((Marker::Asterisk, 2)))]
    #[case("+ item", Some((Marker::Plus, 2)))]
    #[case("1. first", Some((Marker::Numbered, 3)))]
    #[case("42) answer", Some((Marker::Numbered, 4)))]
    #[case("-", Some((Marker::Dash, 1)))]
    #[case("-dash", None)]
    #[case("1.5 apples", None)]
    #[case("text", None)]
    fn list_markers(#[case] line: &str, #[case] expected: Option<(Marker, usize)>) {
        assert_eq!(ListItem::open(line), expected);
    }

    #[rstest]
    #[case("- [ ] todo", Some((false, 6)))]
    #[case("- [x] done", Some((true, 6)))]
    #[case("* [X] done", Some((true, 6)))]
    #[case("- [ ]", Some((false, 5)))]
    #[case("- [?] odd", None)]
    #[case("- [ ]x", None)]
    #[case("1. [ ] numbered", None)]
    #[case("- item", None)]
    fn checklist_markers(#[case] line: &str, #[case] expected: Option<(bool, usize)>) {
        assert_eq!(ListItem::open_checklist(line), expected);
    }
}
