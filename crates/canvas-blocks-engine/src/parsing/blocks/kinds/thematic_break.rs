/// `---`, `***` and `___` rules.
pub struct ThematicBreak;

impl ThematicBreak {
    pub const MIN_MARKS: usize = 3;

    /// True if `rest` is three or more of the same rule character, with
    /// optional spaces in between.
    pub fn matches(rest: &str) -> bool {
        let mut marks = rest.chars().filter(|c| !c.is_whitespace());
        let Some(first) = marks.next() else {
            return false;
        };
        if !matches!(first, '-' | '*' | '_') {
            return false;
        }
        let mut count = 1;
        for c in marks {
            if c != first {
                return false;
            }
            count += 1;
        }
        count >= Self::MIN_MARKS
    }
}
