//! # Block Parsing
//!
//! Line-local block parsing: each line becomes exactly one block.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): Each line is classified into a `LineClass`
//!    containing local facts (blockquote depth, indentation, blank status)
//!
//! 2. **Block Construction** (`builder`): A `BlockBuilder` tracks the container path
//!    and emits one `Block` per classified line
//!
//! ## Modules
//!
//! - **`types`**: Core types (`Block`, `BlockKind`, `ContainerFrame`, `Marker`)
//! - **`kinds`**: Block-specific syntax knowledge (BlockQuote, Heading, ListItem, ThematicBreak)
//! - **`classify`**: `MarkdownLineClassifier` produces `LineClass` for each line
//! - **`containers`**: `ContainerPath` for managing nested container state
//! - **`open`**: `try_open_leaf` dispatch for detecting block openers
//! - **`builder`**: `BlockBuilder` for block construction
//!
//! ## Key Invariants
//!
//! - A block's `enclosing_range` is exactly one physical line, terminator included
//! - No block depends on its neighbours, so any line-aligned slice re-parses identically
//! - All blocks store character spans into the rope

pub mod builder;
pub mod classify;
pub mod containers;
pub mod kinds;
pub mod open;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{LineClass, MarkdownLineClassifier};
pub use types::{Block, BlockKind, ContainerFrame, Marker};
