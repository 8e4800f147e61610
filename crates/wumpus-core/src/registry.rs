//! Per-session state keyed by ID behind a single lock.
//!
//! Each caller owns a [`SessionId`] and all mutation funnels through the
//! registry's mutex, so concurrent callers cannot interleave a reset with
//! a move. The lock is held only for the duration of one operation;
//! nothing inside blocks on anything but the lock itself.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use tracing::info;
use wumpus_types::{GameState, SessionId};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::session::GameSession;

/// Owns every live session, keyed by [`SessionId`].
#[derive(Debug)]
pub struct SessionRegistry {
    /// Configuration applied to every new session.
    config: GameConfig,
    /// Live sessions behind the mutation lock.
    sessions: Mutex<BTreeMap<SessionId, GameSession>>,
}

impl SessionRegistry {
    /// An empty registry that builds sessions from the given config.
    pub const fn new(config: GameConfig) -> Self {
        Self {
            config,
            sessions: Mutex::new(BTreeMap::new()),
        }
    }

    /// Create a session and start its first game.
    ///
    /// # Errors
    ///
    /// Propagates world-generation failures and lock poisoning.
    pub fn create_session(&self) -> Result<(SessionId, GameState), GameError> {
        let mut session = GameSession::new(&self.config)?;
        let state = session.init_game();
        let id = SessionId::new();
        let mut sessions = self.lock()?;
        sessions.insert(id, session);
        info!(%id, "session created");
        Ok((id, state))
    }

    /// Restart an existing session's game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionNotFound`] for unknown IDs.
    pub fn init_game(&self, id: SessionId) -> Result<GameState, GameError> {
        self.with_session(id, |session| Ok(session.init_game()))
    }

    /// Let the engine move in the given session.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionNotFound`] for unknown IDs.
    pub fn auto_move(&self, id: SessionId) -> Result<GameState, GameError> {
        self.with_session(id, GameSession::auto_move)
    }

    /// Apply a caller-supplied `[row, col]` move in the given session.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionNotFound`] for unknown IDs, plus any
    /// validation error from the move itself.
    pub fn manual_move(&self, id: SessionId, raw: &[i64]) -> Result<GameState, GameError> {
        self.with_session(id, |session| session.manual_move(raw))
    }

    /// Snapshot a session's current state without mutating it.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionNotFound`] for unknown IDs.
    pub fn state(&self, id: SessionId, reason: &str) -> Result<GameState, GameError> {
        self.with_session(id, |session| Ok(session.state_with_reason(reason)))
    }

    /// Drop a session. Unknown IDs are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::LockPoisoned`] if the lock is poisoned.
    pub fn remove_session(&self, id: SessionId) -> Result<(), GameError> {
        let mut sessions = self.lock()?;
        sessions.remove(&id);
        Ok(())
    }

    /// Number of live sessions.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::LockPoisoned`] if the lock is poisoned.
    pub fn session_count(&self) -> Result<usize, GameError> {
        Ok(self.lock()?.len())
    }

    /// Run one operation against a session while holding the lock.
    fn with_session<T>(
        &self,
        id: SessionId,
        operation: impl FnOnce(&mut GameSession) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let mut sessions = self.lock()?;
        let session = sessions
            .get_mut(&id)
            .ok_or(GameError::SessionNotFound(id))?;
        operation(session)
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<SessionId, GameSession>>, GameError> {
        self.sessions
            .lock()
            .map_err(|_poisoned| GameError::LockPoisoned)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wumpus_types::Position;

    use super::*;

    #[test]
    fn sessions_are_created_and_counted() {
        let registry = SessionRegistry::new(GameConfig::default());
        assert_eq!(registry.session_count().unwrap(), 0);

        let (id, state) = registry.create_session().unwrap();
        assert_eq!(registry.session_count().unwrap(), 1);
        assert_eq!(state.move_reason, "Game started");
        assert_eq!(state.agent_pos, Position::START);

        registry.remove_session(id).unwrap();
        assert_eq!(registry.session_count().unwrap(), 0);
    }

    #[test]
    fn unknown_sessions_are_reported() {
        let registry = SessionRegistry::new(GameConfig::default());
        let ghost = SessionId::new();
        assert!(matches!(
            registry.auto_move(ghost),
            Err(GameError::SessionNotFound(id)) if id == ghost
        ));
    }

    #[test]
    fn sessions_are_isolated_from_each_other() {
        let registry = SessionRegistry::new(GameConfig::default());
        let (first, _) = registry.create_session().unwrap();
        let (second, _) = registry.create_session().unwrap();

        let moved = registry.manual_move(first, &[1, 0]).unwrap();
        assert_eq!(moved.move_history.len(), 1);

        let untouched = registry.state(second, "peek").unwrap();
        assert!(untouched.move_history.is_empty());
        assert_eq!(untouched.agent_pos, Position::START);
    }

    #[test]
    fn restarting_a_session_resets_it() {
        let registry = SessionRegistry::new(GameConfig::default());
        let (id, _) = registry.create_session().unwrap();
        let _ = registry.manual_move(id, &[1, 1]).unwrap();

        let state = registry.init_game(id).unwrap();
        assert_eq!(state.agent_pos, Position::START);
        assert!(state.move_history.is_empty());
        assert!(!state.game_over);
    }

    #[test]
    fn move_errors_leave_sessions_usable() {
        let registry = SessionRegistry::new(GameConfig::default());
        let (id, _) = registry.create_session().unwrap();
        assert!(registry.manual_move(id, &[9, 9]).is_err());

        let state = registry.state(id, "still alive").unwrap();
        assert_eq!(state.agent_pos, Position::START);
        assert!(!state.game_over);
    }
}
