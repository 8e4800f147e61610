//! Percept deduction and move selection for the Wumpus World engine.
//!
//! Everything in this crate is a pure function over the visited-restricted
//! [`VisibleGrid`]: the engine never sees ground truth, never mutates
//! anything, and (apart from the explicitly randomized wanderer in
//! [`explore`]) always returns the same answer for the same inputs.
//!
//! # Modules
//!
//! - [`classify`] -- The deduction pass that sorts unexplored cells into
//!   safe, dangerous, and risky.
//! - [`selector`] -- Rule-ordered move selection with breadth-first
//!   pathfinding and human-readable justifications.
//! - [`explore`] -- The randomized local wanderer, isolated from the
//!   deterministic selector.
//!
//! [`VisibleGrid`]: wumpus_types::VisibleGrid

pub mod classify;
pub mod explore;
pub mod selector;

pub use classify::{Classification, classify};
pub use explore::exploratory_move;
pub use selector::{SelectedMove, select_move};
