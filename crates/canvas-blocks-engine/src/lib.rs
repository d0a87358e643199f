pub mod editing;
pub mod io;
pub mod parsing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{
    ChangeEvent, Controller, ControllerDelegate, ControllerError, ControllerOptions, EventLog,
    Patch,
};
pub use io::*;
pub use parsing::{
    BlockParser, LineParser,
    blocks::{Block, BlockKind, ContainerFrame, Marker},
    rope::Span,
};
