//! Error types for the `wumpus-core` crate.
//!
//! A finished game is deliberately not an error: operations on a finished
//! session return the current state with an explanatory reason instead,
//! so clients can keep rendering.

use wumpus_types::{Position, SessionId};
use wumpus_world::WorldError;

/// Errors surfaced by game-session operations.
///
/// Every failure is synchronous and leaves world and agent state valid
/// and queryable.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Manual move input was not a two-element coordinate.
    #[error("move must be a two-element [row, col] coordinate")]
    InvalidMoveFormat,

    /// Move target lies outside the grid.
    #[error("move target ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBounds {
        /// Requested row, as supplied by the caller.
        row: i64,
        /// Requested column, as supplied by the caller.
        col: i64,
        /// Side length of the grid.
        size: usize,
    },

    /// Manual move target is not in the agent's Moore neighborhood.
    #[error("move target {target} is not adjacent to the agent at {current}")]
    NonAdjacentMove {
        /// Where the agent currently stands.
        current: Position,
        /// The rejected destination.
        target: Position,
    },

    /// No session with the given ID exists in the registry.
    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    /// The registry lock was poisoned by a panicking holder.
    #[error("session registry lock poisoned")]
    LockPoisoned,

    /// A world-level failure.
    #[error(transparent)]
    World(#[from] WorldError),
}
