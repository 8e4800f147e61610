//! Agent state and the per-turn move transition.
//!
//! The [`Agent`] tracks position, move history, and the game-over latch.
//! [`Agent::make_move`] applies one turn against the [`World`]: it
//! validates manual moves, consults the deterministic selector for
//! automatic ones, applies the world transition, and records the outcome
//! in the history.

use tracing::{info, warn};
use wumpus_logic::select_move;
use wumpus_types::{CellContent, MoveRecord, Position};
use wumpus_world::World;

use crate::error::GameError;

/// Mutable per-session agent state.
///
/// The visited set lives on the [`World`]; the agent only carries what
/// the world does not: its history and the game-over latch.
#[derive(Debug, Clone)]
pub struct Agent {
    /// Current position.
    position: Position,
    /// Latched once a terminal cell is entered or no move remains.
    game_over: bool,
    /// Append-only record of applied moves.
    history: Vec<MoveRecord>,
}

impl Agent {
    /// A fresh agent at the start cell.
    pub const fn new() -> Self {
        Self {
            position: Position::START,
            game_over: false,
            history: Vec::new(),
        }
    }

    /// Current position.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Whether the game has ended for this agent.
    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Ordered move history, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// The cell the agent occupied before its latest move, from the
    /// structured history. `None` until two moves have been recorded.
    pub fn previous_cell(&self) -> Option<Position> {
        self.history.iter().rev().nth(1).map(|record| record.position)
    }

    /// Return to the start cell with empty history and a fresh game.
    pub fn reset(&mut self) {
        self.position = Position::START;
        self.game_over = false;
        self.history.clear();
    }

    /// Apply one turn.
    ///
    /// With `manual_pos` the move is validated for bounds and adjacency,
    /// then applied verbatim. Without it the deterministic selector
    /// chooses; a selector that stays put means no safe or risky
    /// destination remains, which ends the game without a history entry.
    ///
    /// Entering a pit or wumpus cell loses the game; entering a gold cell
    /// wins it. Either way the game-over flag latches, and later calls
    /// return a "Game over." reason without touching any state.
    ///
    /// Returns the reason string describing what happened.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] or [`GameError::NonAdjacentMove`]
    /// for invalid manual moves; the session is left unchanged.
    pub fn make_move(
        &mut self,
        world: &mut World,
        manual_pos: Option<Position>,
    ) -> Result<String, GameError> {
        if self.game_over {
            return Ok("Game over.".to_owned());
        }

        let (next_pos, mut reason) = match manual_pos {
            Some(target) => {
                self.validate_manual(world, target)?;
                (target, format!("Manual move to {target}."))
            }
            None => {
                let chosen =
                    select_move(&world.visible_grid(), self.position, self.previous_cell());
                if chosen.target == self.position {
                    self.game_over = true;
                    info!("no moves remain; ending game");
                    return Ok("No safe moves left. Game over.".to_owned());
                }
                let header = format!("Automatic move to {}. {}", chosen.target, chosen.reason);
                (chosen.target, header)
            }
        };

        let (content, _percepts) = world.move_agent(next_pos)?;
        self.position = next_pos;

        match content {
            CellContent::Pit => {
                self.game_over = true;
                reason.push_str(" Fell into a pit.");
            }
            CellContent::Wumpus => {
                self.game_over = true;
                reason.push_str(" Eaten by the wumpus!");
            }
            CellContent::Gold => {
                self.game_over = true;
                reason.push_str(" Found the gold!");
            }
            CellContent::Empty => {}
        }

        self.history.push(MoveRecord {
            position: next_pos,
            label: next_pos.label(),
            reason: reason.clone(),
        });
        info!(destination = %next_pos, game_over = self.game_over, "move applied");

        Ok(reason)
    }

    /// Bounds and adjacency validation for a manual move.
    fn validate_manual(&self, world: &World, target: Position) -> Result<(), GameError> {
        let size = world.size();
        if target.row >= size || target.col >= size {
            warn!(%target, size, "manual move out of bounds");
            return Err(GameError::OutOfBounds {
                row: i64::try_from(target.row).unwrap_or(i64::MAX),
                col: i64::try_from(target.col).unwrap_or(i64::MAX),
                size,
            });
        }
        if !self.position.is_adjacent(target) {
            warn!(current = %self.position, %target, "manual move not adjacent");
            return Err(GameError::NonAdjacentMove {
                current: self.position,
                target,
            });
        }
        Ok(())
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use wumpus_types::CellContent;

    use super::*;

    const E: CellContent = CellContent::Empty;

    fn empty_world(size: usize) -> World {
        World::from_cells(vec![vec![E; size]; size]).unwrap()
    }

    fn world_with(size: usize, placed: &[(Position, CellContent)]) -> World {
        let mut cells = vec![vec![E; size]; size];
        for &(pos, content) in placed {
            cells[pos.row][pos.col] = content;
        }
        World::from_cells(cells).unwrap()
    }

    #[test]
    fn manual_move_records_history() {
        let mut world = empty_world(3);
        let mut agent = Agent::new();
        let reason = agent
            .make_move(&mut world, Some(Position::new(1, 1)))
            .unwrap();
        assert!(reason.starts_with("Manual move to B2."));
        assert_eq!(agent.position(), Position::new(1, 1));
        assert_eq!(agent.history().len(), 1);
        assert_eq!(agent.history()[0].label, "B2");
        assert!(!agent.is_game_over());
    }

    #[test]
    fn manual_move_rejects_out_of_bounds() {
        let mut world = empty_world(3);
        let mut agent = Agent::new();
        let result = agent.make_move(&mut world, Some(Position::new(3, 0)));
        assert!(matches!(result, Err(GameError::OutOfBounds { .. })));
        assert_eq!(agent.position(), Position::START);
        assert!(agent.history().is_empty());
    }

    #[test]
    fn manual_move_rejects_non_adjacent_targets() {
        let mut world = empty_world(4);
        let mut agent = Agent::new();
        let result = agent.make_move(&mut world, Some(Position::new(2, 2)));
        assert!(matches!(result, Err(GameError::NonAdjacentMove { .. })));
        assert_eq!(agent.position(), Position::START);
    }

    #[test]
    fn entering_a_pit_loses_the_game() {
        let mut world = world_with(3, &[(Position::new(0, 1), CellContent::Pit)]);
        let mut agent = Agent::new();
        let reason = agent
            .make_move(&mut world, Some(Position::new(0, 1)))
            .unwrap();
        assert!(reason.contains("Fell into a pit."));
        assert!(agent.is_game_over());
    }

    #[test]
    fn entering_the_gold_wins_the_game() {
        let mut world = world_with(3, &[(Position::new(1, 1), CellContent::Gold)]);
        let mut agent = Agent::new();
        let reason = agent
            .make_move(&mut world, Some(Position::new(1, 1)))
            .unwrap();
        assert!(reason.contains("Found the gold!"));
        assert!(agent.is_game_over());
    }

    #[test]
    fn finished_games_are_inert() {
        let mut world = world_with(3, &[(Position::new(0, 1), CellContent::Wumpus)]);
        let mut agent = Agent::new();
        let _ = agent
            .make_move(&mut world, Some(Position::new(0, 1)))
            .unwrap();
        assert!(agent.is_game_over());

        let history_len = agent.history().len();
        let reason = agent
            .make_move(&mut world, Some(Position::new(1, 1)))
            .unwrap();
        assert_eq!(reason, "Game over.");
        assert_eq!(agent.history().len(), history_len);
        assert_eq!(agent.position(), Position::new(0, 1));
    }

    #[test]
    fn auto_move_explores_a_clean_world() {
        let mut world = empty_world(3);
        let mut agent = Agent::new();
        let reason = agent.make_move(&mut world, None).unwrap();
        // The start cell of an empty world is clean, so its neighbors are
        // provably safe; scan order makes (1, 0) the first BFS hit.
        assert_eq!(agent.position(), Position::new(1, 0));
        assert!(reason.starts_with("Automatic move to A2."));
        assert!(!agent.is_game_over());
    }

    #[test]
    fn auto_move_ends_a_hopeless_game() {
        // A pit next to the start condemns every unexplored neighbor, so
        // the selector stays put and the game ends with no history entry.
        let mut world = world_with(5, &[(Position::new(0, 1), CellContent::Pit)]);
        let mut agent = Agent::new();
        let reason = agent.make_move(&mut world, None).unwrap();
        assert_eq!(reason, "No safe moves left. Game over.");
        assert!(agent.is_game_over());
        assert!(agent.history().is_empty());
        assert_eq!(agent.position(), Position::START);
    }

    #[test]
    fn previous_cell_needs_two_moves() {
        let mut world = empty_world(4);
        let mut agent = Agent::new();
        assert_eq!(agent.previous_cell(), None);

        let _ = agent
            .make_move(&mut world, Some(Position::new(1, 0)))
            .unwrap();
        assert_eq!(agent.previous_cell(), None);

        let _ = agent
            .make_move(&mut world, Some(Position::new(2, 0)))
            .unwrap();
        assert_eq!(agent.previous_cell(), Some(Position::new(1, 0)));
    }

    #[test]
    fn reset_clears_everything() {
        let mut world = empty_world(3);
        let mut agent = Agent::new();
        let _ = agent
            .make_move(&mut world, Some(Position::new(1, 1)))
            .unwrap();
        agent.reset();
        assert_eq!(agent.position(), Position::START);
        assert!(agent.history().is_empty());
        assert!(!agent.is_game_over());
    }
}
