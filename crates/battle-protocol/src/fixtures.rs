//! Sample data fixtures for testing.
//!
//! This module provides ready-made test data for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // battle-protocol = { path = "../battle-protocol", features = ["test-fixtures"] }
//!
//! use battle_protocol::fixtures;
//!
//! let events = fixtures::sample_events();
//! ```

use crate::{parse_log, Event};

/// Returns the raw protocol text of a short two-turn singles battle.
///
/// Contains:
/// - player, gen and start records
/// - a lead switch on each side
/// - boosts, weather from an ability, a burn and residual burn damage
/// - a faint followed by a win for Red
pub fn sample_battle_log() -> &'static str {
    include_str!("../tests/fixtures/sample_battle.log")
}

/// Returns the sample battle as parsed events.
pub fn sample_events() -> Vec<Event> {
    parse_log(sample_battle_log())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_events_parse() {
        let events = sample_events();
        assert_eq!(events.len(), sample_battle_log().lines().count());
        assert_eq!(events[0].command, "player");
        assert_eq!(events.last().map(|e| e.command.as_str()), Some("win"));
    }
}
