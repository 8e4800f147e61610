//! Cell contents and percepts.
//!
//! Ground truth and sensory signals are small closed enums rather than
//! strings; display labels are derived only at the serialization boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Cell content
// ---------------------------------------------------------------------------

/// Ground-truth content of a single grid cell.
///
/// Every cell holds exactly one tag. The start cell is always
/// [`CellContent::Empty`]; hazards and gold are never placed there.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CellContent {
    /// Nothing here; the agent may pass through freely.
    #[default]
    Empty,
    /// A bottomless pit. Entering one loses the game.
    Pit,
    /// The wumpus. Entering its cell loses the game.
    Wumpus,
    /// The gold. Entering its cell wins the game.
    Gold,
}

impl CellContent {
    /// Whether this content kills the agent on entry.
    pub const fn is_hazard(self) -> bool {
        matches!(self, Self::Pit | Self::Wumpus)
    }

    /// Whether entering this cell ends the game (win or loss).
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Pit | Self::Wumpus | Self::Gold)
    }

    /// The percept this content radiates into its Moore neighborhood.
    pub const fn percept(self) -> Option<Percept> {
        match self {
            Self::Pit => Some(Percept::Breeze),
            Self::Wumpus => Some(Percept::Stench),
            Self::Empty | Self::Gold => None,
        }
    }
}

impl fmt::Display for CellContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Empty => "empty",
            Self::Pit => "pit",
            Self::Wumpus => "wumpus",
            Self::Gold => "gold",
        };
        write!(f, "{label}")
    }
}

// ---------------------------------------------------------------------------
// Percepts
// ---------------------------------------------------------------------------

/// A sensory signal a cell exhibits because of a hazard in its closed
/// Moore neighborhood (the cell itself or any of its 8 neighbors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Percept {
    /// A pit is nearby.
    Breeze,
    /// The wumpus is nearby.
    Stench,
}

impl fmt::Display for Percept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Breeze => "breeze",
            Self::Stench => "stench",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn hazard_and_terminal_flags() {
        assert!(CellContent::Pit.is_hazard());
        assert!(CellContent::Wumpus.is_hazard());
        assert!(!CellContent::Gold.is_hazard());
        assert!(CellContent::Gold.is_terminal());
        assert!(!CellContent::Empty.is_terminal());
    }

    #[test]
    fn content_radiates_the_matching_percept() {
        assert_eq!(CellContent::Pit.percept(), Some(Percept::Breeze));
        assert_eq!(CellContent::Wumpus.percept(), Some(Percept::Stench));
        assert_eq!(CellContent::Gold.percept(), None);
        assert_eq!(CellContent::Empty.percept(), None);
    }

    #[test]
    fn percepts_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Percept::Breeze).unwrap(), "\"breeze\"");
        assert_eq!(serde_json::to_string(&Percept::Stench).unwrap(), "\"stench\"");
    }

    #[test]
    fn content_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&CellContent::Wumpus).unwrap(), "\"wumpus\"");
    }
}
