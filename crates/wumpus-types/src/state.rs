//! Boundary state structs returned by every state-producing operation.
//!
//! These types define the wire shape the transport layer serializes for
//! clients: the visited-restricted grid, board labels, move history, and
//! per-cell percept map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::Percept;
use crate::grid::{Position, VisibleGrid, column_letter};

/// Column letters and 1-based row numbers for rendering the board frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLabels {
    /// Column letters, `A` onward.
    pub cols: Vec<char>,
    /// Row numbers, `1` onward.
    pub rows: Vec<usize>,
}

impl BoardLabels {
    /// Labels for a square board of the given side length.
    pub fn for_size(size: usize) -> Self {
        Self {
            cols: (0..size).map(column_letter).collect(),
            rows: (1..=size).collect(),
        }
    }
}

/// One entry of the agent's move history.
///
/// The structured position travels alongside its display label so readers
/// never have to parse a label back into coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Where the agent ended up.
    pub position: Position,
    /// Board label of that position, e.g. `B3`.
    pub label: String,
    /// Why the move happened, including any terminal outcome.
    pub reason: String,
}

/// The move the engine would make from a given situation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePreview {
    /// Destination of the best move.
    pub best_move: Position,
    /// Justification naming the rule that fired and its evidence.
    pub reason: String,
}

/// Full derived game state returned by every state-producing operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// The visited-restricted grid view.
    pub visible_grid: VisibleGrid,
    /// The agent's current position.
    pub agent_pos: Position,
    /// Column letters and row numbers for the board frame.
    pub board_labels: BoardLabels,
    /// Percepts at the agent's current cell.
    pub percepts: Vec<Percept>,
    /// Whether the game has ended.
    pub game_over: bool,
    /// Explanation of the most recent operation.
    pub move_reason: String,
    /// Append-only move history, oldest first.
    pub move_history: Vec<MoveRecord>,
    /// Percepts for every visited cell, keyed by `"row,col"`, so clients
    /// can render discovered cells without replaying the game.
    pub cell_percepts: BTreeMap<String, Vec<Percept>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn board_labels_for_the_reference_board() {
        let labels = BoardLabels::for_size(5);
        assert_eq!(labels.cols, vec!['A', 'B', 'C', 'D', 'E']);
        assert_eq!(labels.rows, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn board_labels_serialize_as_letter_strings() {
        let labels = BoardLabels::for_size(2);
        let json = serde_json::to_value(&labels).unwrap();
        assert_eq!(json, serde_json::json!({ "cols": ["A", "B"], "rows": [1, 2] }));
    }

    #[test]
    fn move_records_keep_structured_positions() {
        let record = MoveRecord {
            position: Position::new(2, 1),
            label: Position::new(2, 1).label(),
            reason: "test".to_owned(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["position"], serde_json::json!([2, 1]));
        assert_eq!(json["label"], "B3");
    }
}
