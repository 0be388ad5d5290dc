//! Per-player battle sessions and the in-flight command marker.
//!
//! At most one session exists per player, and at most one command per player
//! runs at a time. [`BusyGuard`] releases the marker on every exit path.

use crate::character::PlayerId;
use crate::combat::BattleSession;
use crate::core::errors::{GameError, GameResult};
use log::debug;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

/// Locks a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<PlayerId, BattleSession>>,
    busy: Mutex<HashSet<PlayerId>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `id` busy until the returned guard is dropped.
    ///
    /// Fails with `GameError::Busy` while another command for the same
    /// player holds the marker.
    pub fn acquire(&self, id: &str) -> GameResult<BusyGuard<'_>> {
        if !lock(&self.busy).insert(id.to_string()) {
            debug!("rejected concurrent command for player {}", id);
            return Err(GameError::Busy(id.to_string()));
        }
        Ok(BusyGuard {
            store: self,
            id: id.to_string(),
        })
    }

    pub fn is_busy(&self, id: &str) -> bool {
        lock(&self.busy).contains(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        lock(&self.sessions).contains_key(id)
    }

    /// Snapshot of a player's session.
    pub fn get(&self, id: &str) -> Option<BattleSession> {
        lock(&self.sessions).get(id).cloned()
    }

    /// Registers a new session. A player already in combat is rejected.
    pub fn insert(&self, session: BattleSession) -> GameResult<()> {
        let mut sessions = lock(&self.sessions);
        if sessions.contains_key(&session.player_id) {
            return Err(GameError::InvalidState(
                "You're already in combat! Use `!attack`, `!skill`, or `!flee`.".to_string(),
            ));
        }
        sessions.insert(session.player_id.clone(), session);
        Ok(())
    }

    /// Runs `f` against the player's session.
    ///
    /// A session that has ended once `f` returns is removed, even when `f`
    /// fails afterwards; an error before the end leaves it in place.
    pub fn with_session<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut BattleSession) -> GameResult<T>,
    ) -> GameResult<T> {
        let mut sessions = lock(&self.sessions);
        let session = sessions.get_mut(id).ok_or_else(|| {
            GameError::InvalidState(
                "You're not in combat right now. Use `!explore` to find monsters.".to_string(),
            )
        })?;
        let result = f(session);
        if session.is_over() {
            sessions.remove(id);
        }
        result
    }

    pub fn remove(&self, id: &str) -> Option<BattleSession> {
        lock(&self.sessions).remove(id)
    }

    pub fn len(&self) -> usize {
        lock(&self.sessions).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Clears the busy marker for one player when dropped.
pub struct BusyGuard<'a> {
    store: &'a SessionStore,
    id: PlayerId,
}

impl BusyGuard<'_> {
    pub fn player_id(&self) -> &str {
        &self.id
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        lock(&self.store.busy).remove(&self.id);
    }
}
