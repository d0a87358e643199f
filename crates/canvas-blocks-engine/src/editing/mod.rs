/*!
 * # Editing Core
 *
 * Keeps a block list in sync with an `xi_rope::Rope` buffer as the buffer
 * is edited, re-parsing only the lines an edit touches.
 *
 * ## Edit pipeline
 *
 * Each call to [`Controller::replace_characters`] runs the same steps:
 *
 * 1. **Normalize** the edit (`resolver::normalize`): a newline inserted in
 *    front of an existing line break is moved behind it
 * 2. **Resolve** the affected block span against the old block list
 *    (`resolver::affected_block_span`)
 * 3. **Mutate** the buffer through an xi-rope `Delta`
 * 4. **Invalidate** a line-aligned text range of the new buffer
 *    (`resolver::reparse_range`) and hand it to the [`BlockParser`]
 * 5. **Reconcile** the fresh blocks with the old ones (`reconciler`),
 *    shifting every later block and producing [`ChangeEvent`]s
 *
 * The result is a [`Patch`]: the events in order, bracketed by
 * `WillUpdate` and `DidUpdate`. Hosts that prefer callbacks implement
 * [`ControllerDelegate`] and call [`Patch::dispatch`].
 *
 * ## Usage
 *
 * ```rust
 * use canvas_blocks_engine::editing::*;
 * use canvas_blocks_engine::parsing::rope::Span;
 *
 * let mut doc = Controller::new("A\nB");
 * let patch = doc.replace_characters(Span::empty(1), "\n");
 *
 * assert_eq!(doc.text(), "A\n\nB");
 * assert_eq!(patch.log().to_string(), "will-update\ninsert 1 Blank 2..3\nrelocate 2 Paragraph 2..3 -> 3..4\ndid-update");
 * ```
 *
 * [`BlockParser`]: crate::parsing::BlockParser
 */

pub mod controller;
pub mod patch;
pub mod reconciler;
pub mod resolver;

pub use controller::{Controller, ControllerError, ControllerOptions};
pub use patch::{ChangeEvent, ControllerDelegate, EventLog, Patch};
pub use reconciler::{Reconciler, Reconciliation};
pub use resolver::{Edit, Invalidation};
