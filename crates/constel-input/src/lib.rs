//! Flight input collection for Constel.
//!
//! Asynchronous pointer and keyboard handlers never touch physics state
//! directly: they append into an [`InputInbox`], and the flight step drains
//! the inbox exactly once per frame (read-then-reset). This preserves a
//! single-writer invariant and makes the frame step pure and testable
//! without a display loop.

mod inbox;
mod intents;

pub use inbox::{InputInbox, RawKeyEvent};
pub use intents::{FlightIntents, FrameInput};
