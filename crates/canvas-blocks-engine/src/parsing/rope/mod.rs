pub mod lines;
pub mod offsets;
pub mod slice;
pub mod span;

pub use lines::{LineRef, lines_in};
pub use offsets::{
    Anchor, byte_range, byte_range_from, char_at, char_len, char_to_byte, char_to_byte_from,
    is_line_boundary, is_newline_at,
};
pub use slice::{preview, slice_to_string};
pub use span::Span;
