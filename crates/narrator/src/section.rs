//! Paragraph sectioning.
//!
//! Every rendered event is classified into a section. Moving between
//! sections decides whether a blank line goes in front of the event's text.

use battle_protocol::{parse_effect, Command, Event};
use serde::{Deserialize, Serialize};

/// Section of a narration line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineSection {
    /// Turn boundary
    #[default]
    Break,
    /// Lead-in to a major action (faints, withdrawals)
    PreMajor,
    /// A major action (moves, switches)
    Major,
    /// Consequences of a major action
    PostMajor,
}

/// Classifies an event, `None` if it leaves the section unchanged.
pub fn classify(command: Command, event: &Event) -> Option<LineSection> {
    let section = match command {
        Command::Turn => LineSection::Break,
        Command::Move
        | Command::Cant
        | Command::Switch
        | Command::Drag
        | Command::Start
        | Command::Mega => LineSection::Major,
        Command::Faint | Command::SwitchOut => LineSection::PreMajor,
        Command::ZPower => LineSection::PostMajor,
        Command::Damage => match effect_id(event.kw("from")).as_str() {
            "confusion" => LineSection::Major,
            _ => LineSection::PostMajor,
        },
        Command::CureStatus => match effect_id(event.kw("from")).as_str() {
            "naturalcure" => LineSection::PreMajor,
            _ => LineSection::PostMajor,
        },
        Command::StartEffect => match effect_id(event.kw("from")).as_str() {
            "protean" => LineSection::PreMajor,
            _ => LineSection::PostMajor,
        },
        Command::Activate => match effect_id(event.arg(2)).as_str() {
            "confusion" | "attract" => LineSection::PreMajor,
            _ => LineSection::PostMajor,
        },
        other if other.is_minor() => LineSection::PostMajor,
        _ => return None,
    };
    Some(section)
}

fn effect_id(raw: Option<&str>) -> String {
    parse_effect(raw).id
}

/// Tracks the current section across a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionTracker {
    current: LineSection,
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> LineSection {
        self.current
    }

    /// Moves to `target` and returns true if a blank line precedes it.
    pub fn advance(&mut self, target: Option<LineSection>) -> bool {
        let Some(target) = target else {
            return false;
        };
        let previous = std::mem::replace(&mut self.current, target);
        match target {
            LineSection::Break => previous != LineSection::Break,
            LineSection::PreMajor | LineSection::Major => {
                matches!(previous, LineSection::PostMajor | LineSection::Major)
            }
            LineSection::PostMajor => false,
        }
    }
}
