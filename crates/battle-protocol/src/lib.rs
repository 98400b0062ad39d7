//! Battle protocol event types and parsing.
//!
//! This crate contains pure data structures with no rendering logic.
//! It is a dependency for all other crates in the workspace.

pub mod command;
pub mod effect;
pub mod event;
pub mod side;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

// Re-export command vocabulary
pub use command::Command;

// Re-export effect resolution
pub use effect::{parse_effect, to_id, EffectKind, EffectRef};

// Re-export event types
pub use event::{parse_log, Event, KwArgs, ProtocolError};

// Re-export side types
pub use side::{side_token, InvalidPerspective, Perspective, Side};
