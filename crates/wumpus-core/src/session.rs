//! A single game session and the boundary operations served to clients.
//!
//! [`GameSession`] couples one [`World`] with one [`Agent`] and exposes
//! the operations a transport layer calls: starting a game, automatic and
//! manual moves, and full-state snapshots. [`preview_best_move`] is the
//! stateless counterpart answering "what would the engine do here"
//! without touching any session.

use std::collections::BTreeMap;

use tracing::info;
use wumpus_logic::select_move;
use wumpus_types::{BoardLabels, GameState, MovePreview, Percept, Position, VisibleGrid};
use wumpus_world::World;

use crate::agent::Agent;
use crate::config::GameConfig;
use crate::error::GameError;

/// One complete game: ground-truth world plus agent state.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// The ground-truth board.
    world: World,
    /// The exploring agent.
    agent: Agent,
}

impl GameSession {
    /// Create a session from a configuration.
    ///
    /// # Errors
    ///
    /// Returns a world-generation error when the configured board cannot
    /// be realized.
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        let world = World::generate(config.board.layout(), config.board.seed)?;
        Ok(Self {
            world,
            agent: Agent::new(),
        })
    }

    /// Wrap an existing world in a fresh session, for fixed-layout
    /// scenarios.
    pub const fn from_world(world: World) -> Self {
        Self {
            world,
            agent: Agent::new(),
        }
    }

    /// Start a new game: regenerate the world and reset the agent.
    pub fn init_game(&mut self) -> GameState {
        self.world.reset();
        self.agent.reset();
        info!("game started");
        self.state_with_reason("Game started")
    }

    /// Let the engine make its move.
    ///
    /// The applied move and the explanation's "best move" come from the
    /// same deterministic selector over identical inputs, so the
    /// comparison always reports agreement here; the comparison exists so
    /// manual and automatic moves share one explanation format.
    ///
    /// # Errors
    ///
    /// Propagates world-level failures; selector moves are always in
    /// bounds, so none are expected.
    pub fn auto_move(&mut self) -> Result<GameState, GameError> {
        if self.agent.is_game_over() {
            return Ok(self.state_with_reason("Game already over"));
        }

        let best = select_move(
            &self.world.visible_grid(),
            self.agent.position(),
            self.agent.previous_cell(),
        );
        let move_reason = self.agent.make_move(&mut self.world, None)?;
        let explanation = comparison_explanation(
            "Auto-move",
            self.agent.position(),
            best.target,
            &best.reason,
            &move_reason,
        );
        Ok(self.state_with_reason(explanation))
    }

    /// Apply a caller-supplied move.
    ///
    /// `raw` must be a two-element `[row, col]` pair; the target must be
    /// in bounds and adjacent to the agent. A finished game returns the
    /// current state with a "Game already over" reason instead of moving.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidMoveFormat`],
    /// [`GameError::OutOfBounds`], or [`GameError::NonAdjacentMove`]; the
    /// session is unchanged on error.
    pub fn manual_move(&mut self, raw: &[i64]) -> Result<GameState, GameError> {
        if self.agent.is_game_over() {
            return Ok(self.state_with_reason("Game already over"));
        }

        let target = parse_move(raw, self.world.size())?;
        let best = select_move(
            &self.world.visible_grid(),
            self.agent.position(),
            self.agent.previous_cell(),
        );
        let move_reason = self.agent.make_move(&mut self.world, Some(target))?;
        let explanation =
            comparison_explanation("Manual move", target, best.target, &best.reason, &move_reason);
        Ok(self.state_with_reason(explanation))
    }

    /// Snapshot the full derived state with the given reason attached.
    pub fn state_with_reason(&self, reason: impl Into<String>) -> GameState {
        let cell_percepts: BTreeMap<String, Vec<Percept>> = self
            .world
            .visited_percepts()
            .iter()
            .map(|(pos, percepts)| (format!("{},{}", pos.row, pos.col), percepts.to_vec()))
            .collect();

        GameState {
            visible_grid: self.world.visible_grid(),
            agent_pos: self.agent.position(),
            board_labels: BoardLabels::for_size(self.world.size()),
            percepts: self.world.percepts(self.agent.position()).to_vec(),
            game_over: self.agent.is_game_over(),
            move_reason: reason.into(),
            move_history: self.agent.history().to_vec(),
            cell_percepts,
        }
    }

    /// Read access to the world, for inspection and scenario tests.
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Read access to the agent.
    pub const fn agent(&self) -> &Agent {
        &self.agent
    }
}

/// What the engine would do from the given situation.
///
/// Stateless: a pure function of the supplied grid and position, touching
/// no session. The previous-cell refinement of the trapped-return rule is
/// unavailable here; callers that track history can invoke
/// [`wumpus_logic::select_move`] directly with it.
pub fn preview_best_move(grid: &VisibleGrid, agent_pos: Position) -> MovePreview {
    let chosen = select_move(grid, agent_pos, None);
    MovePreview {
        best_move: chosen.target,
        reason: chosen.reason,
    }
}

/// Parse and bounds-check a raw `[row, col]` pair.
fn parse_move(raw: &[i64], size: usize) -> Result<Position, GameError> {
    let &[row, col] = raw else {
        return Err(GameError::InvalidMoveFormat);
    };
    let row_idx = usize::try_from(row).ok().filter(|&r| r < size);
    let col_idx = usize::try_from(col).ok().filter(|&c| c < size);
    match (row_idx, col_idx) {
        (Some(r), Some(c)) => Ok(Position::new(r, c)),
        _ => Err(GameError::OutOfBounds { row, col, size }),
    }
}

/// Render the "chosen vs best" explanation attached to every move.
fn comparison_explanation(
    kind: &str,
    chosen: Position,
    best: Position,
    best_reason: &str,
    move_reason: &str,
) -> String {
    if chosen == best {
        format!(
            "{kind} chosen: {chosen}. This is the best move according to the agent's knowledge. Reason for best move: {best_reason}"
        )
    } else {
        format!(
            "{kind} chosen: {chosen}. This is NOT the best move according to the agent's knowledge. The best move would have been {best}. Reason for best move: {best_reason}. Reason for chosen move: {move_reason}"
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use wumpus_types::{CellContent, CellView};

    use super::*;

    const E: CellContent = CellContent::Empty;

    fn session_with(size: usize, placed: &[(Position, CellContent)]) -> GameSession {
        let mut cells = vec![vec![E; size]; size];
        for &(pos, content) in placed {
            cells[pos.row][pos.col] = content;
        }
        GameSession::from_world(World::from_cells(cells).unwrap())
    }

    fn single_pit_session() -> GameSession {
        session_with(5, &[(Position::new(0, 1), CellContent::Pit)])
    }

    #[test]
    fn new_sessions_start_at_the_origin() {
        let config = GameConfig::default();
        let session = GameSession::new(&config).unwrap();
        let state = session.state_with_reason("fresh");
        assert_eq!(state.agent_pos, Position::START);
        assert!(!state.game_over);
        assert!(state.move_history.is_empty());
        assert_eq!(state.board_labels.cols, vec!['A', 'B', 'C', 'D', 'E']);
    }

    #[test]
    fn init_game_resets_everything() {
        let config = GameConfig::default();
        let mut session = GameSession::new(&config).unwrap();
        let _ = session.manual_move(&[1, 0]);
        let state = session.init_game();
        assert_eq!(state.move_reason, "Game started");
        assert_eq!(state.agent_pos, Position::START);
        assert!(state.move_history.is_empty());
        assert_eq!(state.cell_percepts.len(), 1);
    }

    #[test]
    fn state_exposes_the_wire_shape() {
        let session = single_pit_session();
        let state = session.state_with_reason("Game started");
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["agent_pos"], serde_json::json!([0, 0]));
        assert_eq!(json["visible_grid"][0][0], "breeze");
        assert_eq!(json["visible_grid"][0][1], "unknown");
        assert_eq!(json["percepts"], serde_json::json!(["breeze"]));
        assert_eq!(json["cell_percepts"]["0,0"], serde_json::json!(["breeze"]));
        assert_eq!(json["game_over"], false);
        assert_eq!(
            json["board_labels"]["cols"],
            serde_json::json!(["A", "B", "C", "D", "E"])
        );
        assert_eq!(
            json["board_labels"]["rows"],
            serde_json::json!([1, 2, 3, 4, 5])
        );
    }

    #[test]
    fn auto_move_reports_agreement_with_itself() {
        let mut session = session_with(3, &[]);
        let state = session.auto_move().unwrap();
        assert!(state.move_reason.contains("This is the best move"));
        assert_eq!(state.agent_pos, Position::new(1, 0));
        assert_eq!(state.move_history.len(), 1);
    }

    #[test]
    fn hopeless_start_ends_on_the_first_auto_move() {
        // The single pit beside the start condemns every unexplored
        // neighbor, so the engine has nowhere to go.
        let mut session = single_pit_session();
        let state = session.auto_move().unwrap();
        assert!(state.game_over);
        assert_eq!(state.agent_pos, Position::START);
        assert!(state.move_history.is_empty());
        assert!(state.move_reason.contains("Staying in place"));
    }

    #[test]
    fn manual_move_validates_its_input() {
        let mut session = session_with(3, &[]);
        assert!(matches!(
            session.manual_move(&[1]),
            Err(GameError::InvalidMoveFormat)
        ));
        assert!(matches!(
            session.manual_move(&[0, 1, 2]),
            Err(GameError::InvalidMoveFormat)
        ));
        assert!(matches!(
            session.manual_move(&[-1, 0]),
            Err(GameError::OutOfBounds { row: -1, col: 0, .. })
        ));
        assert!(matches!(
            session.manual_move(&[0, 9]),
            Err(GameError::OutOfBounds { .. })
        ));
        assert!(matches!(
            session.manual_move(&[2, 2]),
            Err(GameError::NonAdjacentMove { .. })
        ));
        // Nothing moved.
        assert_eq!(session.agent().position(), Position::START);
    }

    #[test]
    fn manual_move_explains_disagreement() {
        // In an all-empty world the engine would go to (1, 0); moving to
        // (1, 1) instead is flagged as not the best move.
        let mut session = session_with(4, &[]);
        let state = session.manual_move(&[1, 1]).unwrap();
        assert!(state.move_reason.contains("NOT the best move"));
        assert!(state.move_reason.contains("A2"));
        assert_eq!(state.agent_pos, Position::new(1, 1));
    }

    #[test]
    fn manual_move_onto_the_best_cell_agrees() {
        let mut session = session_with(4, &[]);
        let state = session.manual_move(&[1, 0]).unwrap();
        assert!(state.move_reason.contains("This is the best move"));
    }

    #[test]
    fn gold_ends_the_game_until_reinit() {
        let mut session = session_with(3, &[(Position::new(0, 1), CellContent::Gold)]);
        let state = session.manual_move(&[0, 1]).unwrap();
        assert!(state.game_over);
        assert!(state.move_reason.contains("Found the gold!"));
        assert_eq!(
            state.visible_grid.get(Position::new(0, 1)),
            Some(CellView::Gold)
        );

        // Every later operation is a reasoned no-op.
        let after = session.auto_move().unwrap();
        assert!(after.game_over);
        assert_eq!(after.move_reason, "Game already over");
        let after = session.manual_move(&[1, 1]).unwrap();
        assert_eq!(after.move_reason, "Game already over");
    }

    #[test]
    fn preview_is_pure_and_idempotent() {
        let session = single_pit_session();
        let grid = session.world().visible_grid();
        let first = preview_best_move(&grid, Position::START);
        let second = preview_best_move(&grid, Position::START);
        assert_eq!(first, second);
        // The session is untouched: previewing mutated nothing.
        assert_eq!(session.world().visited().len(), 1);
        assert_eq!(first.best_move, Position::START);
    }

    #[test]
    fn preview_matches_the_wire_shape() {
        let session = session_with(3, &[]);
        let preview = preview_best_move(&session.world().visible_grid(), Position::START);
        let json = serde_json::to_value(&preview).unwrap();
        assert_eq!(json["best_move"], serde_json::json!([1, 0]));
        assert!(json["reason"].as_str().unwrap().contains("provably safe"));
    }

    #[test]
    fn history_records_terminal_moves() {
        let mut session = session_with(3, &[(Position::new(1, 1), CellContent::Wumpus)]);
        let state = session.manual_move(&[1, 1]).unwrap();
        assert_eq!(state.move_history.len(), 1);
        let record = &state.move_history[0];
        assert_eq!(record.label, "B2");
        assert!(record.reason.contains("Eaten by the wumpus!"));
    }
}
