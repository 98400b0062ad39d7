//! Sides and perspective.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two sides of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    P1,
    P2,
}

impl Side {
    /// Recognizes the side from the start of a side token or pokemon
    /// identifier (`p1`, `p2a: Gengar`).
    pub fn from_token(token: &str) -> Option<Side> {
        match side_token(token) {
            "p1" => Some(Side::P1),
            "p2" => Some(Side::P2),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::P1 => "p1",
            Side::P2 => "p2",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the first two characters of a side-bearing string, or the whole
/// string when it is shorter.
pub fn side_token(s: &str) -> &str {
    match s.char_indices().nth(2) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

/// Which side a renderer narrates as its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Perspective {
    /// Player 1 is "own"
    #[default]
    P1,
    /// Player 2 is "own"
    P2,
}

impl Perspective {
    /// The side narrated as own.
    pub fn own_side(&self) -> Side {
        match self {
            Perspective::P1 => Side::P1,
            Perspective::P2 => Side::P2,
        }
    }

    /// True if `side` is the narrated side.
    pub fn is_own(&self, side: Side) -> bool {
        self.own_side() == side
    }

    /// Numeric form used on the wire and in configuration.
    pub fn index(&self) -> u8 {
        match self {
            Perspective::P1 => 0,
            Perspective::P2 => 1,
        }
    }
}

impl TryFrom<u8> for Perspective {
    type Error = InvalidPerspective;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Perspective::P1),
            1 => Ok(Perspective::P2),
            other => Err(InvalidPerspective(other)),
        }
    }
}

impl From<Perspective> for u8 {
    fn from(p: Perspective) -> u8 {
        p.index()
    }
}

/// A perspective outside `{0, 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("perspective must be 0 or 1, got {0}")]
pub struct InvalidPerspective(pub u8);
