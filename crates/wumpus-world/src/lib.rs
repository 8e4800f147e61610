//! Ground-truth world model for the Wumpus World engine.
//!
//! This crate owns the physical game board: the hazard and gold layout,
//! percept computation, the monotonically growing visited set, and the
//! visited-restricted view handed to the deduction engine.
//!
//! # Modules
//!
//! - [`error`] -- Error types for world operations.
//! - [`world`] -- The [`World`] itself: seeded generation, percepts,
//!   the visible view, and agent movement.
//!
//! [`World`]: world::World

pub mod error;
pub mod world;

pub use error::WorldError;
pub use world::{World, WorldLayout};
