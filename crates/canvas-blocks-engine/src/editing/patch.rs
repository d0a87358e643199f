use std::fmt;

use serde::Serialize;

use crate::parsing::{blocks::Block, rope::Span};

/// A structural change to the block list, in the order it happened.
///
/// Indices refer to the block list as it stands at the moment the event is
/// applied, so replaying the events in order against the old list yields
/// the new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ChangeEvent {
    WillUpdate,
    Insert {
        block: Block,
        index: usize,
    },
    Remove {
        block: Block,
        index: usize,
    },
    /// Same structural kind, different payload.
    ReplaceContent {
        before: Block,
        index: usize,
        after: Block,
    },
    /// Same kind and payload, new position.
    Relocate {
        before: Block,
        index: usize,
        after: Block,
    },
    DidUpdate,
}

impl ChangeEvent {
    /// True for insert, remove and replace-content events.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ChangeEvent::Insert { .. } | ChangeEvent::Remove { .. } | ChangeEvent::ReplaceContent { .. }
        )
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeEvent::WillUpdate => write!(f, "will-update"),
            ChangeEvent::Insert { block, index } => {
                write!(f, "insert {index} {} {}", block.kind.label(), block.enclosing_range)
            }
            ChangeEvent::Remove { block, index } => {
                write!(f, "remove {index} {} {}", block.kind.label(), block.enclosing_range)
            }
            ChangeEvent::ReplaceContent {
                before,
                index,
                after,
            } => write!(
                f,
                "replace {index} {} {} -> {} {}",
                before.kind.label(),
                before.enclosing_range,
                after.kind.label(),
                after.enclosing_range
            ),
            ChangeEvent::Relocate {
                before,
                index,
                after,
            } => write!(
                f,
                "relocate {index} {} {} -> {}",
                before.kind.label(),
                before.enclosing_range,
                after.enclosing_range
            ),
            ChangeEvent::DidUpdate => write!(f, "did-update"),
        }
    }
}

/// Receives change notifications one call per event.
///
/// Every method defaults to a no-op so a delegate only implements what it
/// cares about.
pub trait ControllerDelegate {
    fn will_update(&mut self) {}
    fn did_insert(&mut self, _block: &Block, _index: usize) {}
    fn did_remove(&mut self, _block: &Block, _index: usize) {}
    fn did_replace_content(&mut self, _before: &Block, _index: usize, _after: &Block) {}
    fn did_relocate(&mut self, _before: &Block, _index: usize, _after: &Block) {}
    fn did_update(&mut self) {}
}

/// Result of applying an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Ordered events, bracketed by `WillUpdate` and `DidUpdate`.
    pub events: Vec<ChangeEvent>,
    /// Text range of the new buffer handed to the parser, if any.
    pub reparsed: Option<Span>,
    pub version: u64,
}

impl Patch {
    /// Replays the events against a delegate, in order.
    pub fn dispatch<D: ControllerDelegate + ?Sized>(&self, delegate: &mut D) {
        for event in &self.events {
            match event {
                ChangeEvent::WillUpdate => delegate.will_update(),
                ChangeEvent::Insert { block, index } => delegate.did_insert(block, *index),
                ChangeEvent::Remove { block, index } => delegate.did_remove(block, *index),
                ChangeEvent::ReplaceContent {
                    before,
                    index,
                    after,
                } => delegate.did_replace_content(before, *index, after),
                ChangeEvent::Relocate {
                    before,
                    index,
                    after,
                } => delegate.did_relocate(before, *index, after),
                ChangeEvent::DidUpdate => delegate.did_update(),
            }
        }
    }

    /// Events between the update brackets.
    pub fn changes(&self) -> impl Iterator<Item = &ChangeEvent> {
        self.events
            .iter()
            .filter(|e| !matches!(e, ChangeEvent::WillUpdate | ChangeEvent::DidUpdate))
    }

    /// An `EventLog` view for printing.
    pub fn log(&self) -> EventLog<'_> {
        EventLog(&self.events)
    }
}

/// Prints events one per line.
pub struct EventLog<'a>(pub &'a [ChangeEvent]);

impl fmt::Display for EventLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, event) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{event}")?;
        }
        Ok(())
    }
}
