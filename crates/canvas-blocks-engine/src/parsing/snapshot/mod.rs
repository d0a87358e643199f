//! # Snapshot Testing Support
//!
//! Utilities for checking block lists and rendering them in a stable text form.
//!
//! ## Modules
//!
//! - **`normalize`**: Renders blocks to a stable one-line-per-block text format
//!   used by `insta` snapshots and the CLI
//! - **`invariants`**: Runtime checks for block list correctness (ranges nest,
//!   enclosing ranges tile the buffer)

pub mod invariants;
pub mod normalize;

pub use invariants::{check as invariants, check_coverage};
pub use normalize::{PREVIEW_WIDTH, normalize, render_block};
