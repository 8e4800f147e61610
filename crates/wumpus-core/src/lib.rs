//! Game-session orchestration for the Wumpus World engine.
//!
//! This crate ties the world model and the deduction engine together into
//! playable sessions: the agent transition rules, the boundary operations
//! a transport layer calls, typed configuration, and a lock-guarded
//! registry for serving multiple sessions from one process.
//!
//! # Modules
//!
//! - [`agent`] -- Agent state and the per-turn move transition.
//! - [`config`] -- Typed configuration with a YAML loader.
//! - [`error`] -- [`GameError`], the session-level error type.
//! - [`registry`] -- [`SessionRegistry`], per-session state behind a lock.
//! - [`session`] -- [`GameSession`] and the boundary operations.
//!
//! [`GameError`]: error::GameError
//! [`SessionRegistry`]: registry::SessionRegistry
//! [`GameSession`]: session::GameSession

pub mod agent;
pub mod config;
pub mod error;
pub mod registry;
pub mod session;

pub use agent::Agent;
pub use config::{BoardConfig, ConfigError, GameConfig};
pub use error::GameError;
pub use registry::SessionRegistry;
pub use session::{GameSession, preview_best_move};
