//! Shared type definitions for the Wumpus World engine.
//!
//! This crate is the single source of truth for the types used across the
//! workspace: the world model, the deduction engine, and the session layer
//! all speak in terms of the types defined here, and the same types flow
//! unchanged to whatever transport layer serves the game to clients.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for session identifiers
//! - [`enums`] -- Cell contents and percepts
//! - [`grid`] -- Positions, percept sets, and the visited-restricted
//!   [`VisibleGrid`] view
//! - [`state`] -- Boundary state structs (game state, move history,
//!   board labels)
//!
//! [`VisibleGrid`]: grid::VisibleGrid

pub mod enums;
pub mod grid;
pub mod ids;
pub mod state;

// Re-export all public types at crate root for convenience.
pub use enums::{CellContent, Percept};
pub use grid::{
    CellView, MAX_GRID_SIZE, NEIGHBOR_OFFSETS, ParseCellViewError, PerceptSet, Position,
    VisibleGrid, column_letter,
};
pub use ids::SessionId;
pub use state::{BoardLabels, GameState, MovePreview, MoveRecord};
