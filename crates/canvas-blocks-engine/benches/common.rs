// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with some content.\n\n- Bullet point\n  - Nested item\n- [ ] Task\n> Quoted line\n---\n\n";
    base.repeat(size)
}

/// Character offset of the start of the middle line.
#[allow(dead_code)]
pub fn middle_line_start(content: &str) -> usize {
    let half = content.chars().count() / 2;
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let len = line.chars().count();
        if offset + len > half {
            return offset;
        }
        offset += len;
    }
    offset
}
