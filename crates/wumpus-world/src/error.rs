//! Error types for the `wumpus-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

use wumpus_types::Position;

/// Errors that can occur during world operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A move or query targeted a position outside the grid.
    #[error("position {position} is outside the {size}x{size} grid")]
    OutOfBounds {
        /// The rejected position.
        position: Position,
        /// Side length of the grid.
        size: usize,
    },

    /// Grid side length outside the supported labeling scheme.
    #[error("grid size {0} is not supported (must be 1..=26)")]
    UnsupportedSize(usize),

    /// More hazards and gold requested than the grid can hold outside the
    /// start cell. Rejection sampling would never terminate on such a
    /// layout, so it is refused up front.
    #[error("cannot place {requested} entities in {available} non-start cells")]
    InfeasibleLayout {
        /// Total pits, wumpuses, and gold requested.
        requested: usize,
        /// Non-start cells available for placement.
        available: usize,
    },

    /// A hand-built grid was not square.
    #[error("cell rows must form a square grid")]
    MalformedGrid,

    /// A hand-built grid put a hazard or gold on the start cell.
    #[error("the start cell must be empty")]
    OccupiedStartCell,
}
