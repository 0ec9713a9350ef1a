//! Registry of live sessions.

use std::collections::HashMap;

use gambit_transport::ConnectionId;

use crate::{Session, SessionId};

/// Every live session, keyed by id and iterable in creation order.
///
/// Matchmaking walks sessions oldest first, so the store keeps an explicit
/// ordering next to the map.
#[derive(Debug)]
pub struct SessionStore<R> {
    sessions: HashMap<SessionId, Session<R>>,
    order: Vec<SessionId>,
}

impl<R> SessionStore<R> {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Adds a session at the end of the creation order.
    pub fn insert(&mut self, session: Session<R>) -> SessionId {
        let id = session.id();
        if self.sessions.insert(id, session).is_none() {
            self.order.push(id);
        }
        id
    }

    pub fn get(&self, id: &SessionId) -> Option<&Session<R>> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &SessionId) -> Option<&mut Session<R>> {
        self.sessions.get_mut(id)
    }

    /// The first session (in creation order) that `conn` belongs to.
    pub fn find_by_connection(&self, conn: ConnectionId) -> Option<SessionId> {
        self.iter().find(|s| s.contains(conn)).map(Session::id)
    }

    /// Removes a session. Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: &SessionId) -> Option<Session<R>> {
        let removed = self.sessions.remove(id)?;
        self.order.retain(|existing| existing != id);
        Some(removed)
    }

    /// Sessions oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Session<R>> + '_ {
        self.order.iter().filter_map(|id| self.sessions.get(id))
    }

    /// Everyone attached to a session; empty if it does not exist.
    pub fn participants(&self, id: &SessionId) -> Vec<ConnectionId> {
        self.get(id).map(Session::participants).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl<R> Default for SessionStore<R> {
    fn default() -> Self {
        Self::new()
    }
}
