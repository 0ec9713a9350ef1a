//! The lobby: session store plus matchmaker behind one synchronous API.
//!
//! Every operation returns the events it produced as an [`Outbox`];
//! [`Lobby::resolve`] turns session recipients into connections once the
//! mutation is done.

use gambit_protocol::MoveDescriptor;
use gambit_rules::RulesEngine;
use gambit_transport::ConnectionId;

use crate::coordinator::{self, Departure, MoveResolution};
use crate::{
    Assignment, Matchmaker, MatchmakingConfig, Outbox, Recipient, Session, SessionError,
    SessionInfo, SessionStore,
};

/// All session state in one place: the store and the matchmaker that
/// feeds it.
///
/// Synchronous and single-owner. The actor started by
/// [`spawn_lobby`](crate::spawn_lobby) owns one and serializes access to it.
#[derive(Debug)]
pub struct Lobby<R> {
    store: SessionStore<R>,
    matchmaker: Matchmaker,
}

impl<R: RulesEngine> Lobby<R> {
    pub fn new(config: MatchmakingConfig) -> Self {
        Self {
            store: SessionStore::new(),
            matchmaker: Matchmaker::new(config),
        }
    }

    /// See [`Matchmaker::admit`].
    pub fn admit(&mut self, conn: ConnectionId) -> Result<(Assignment, Outbox), SessionError> {
        self.matchmaker.admit(&mut self.store, conn)
    }

    /// See [`coordinator::submit_move`].
    pub fn submit_move(
        &mut self,
        conn: ConnectionId,
        mv: MoveDescriptor,
    ) -> (MoveResolution, Outbox) {
        coordinator::submit_move(&mut self.store, conn, mv)
    }

    /// See [`coordinator::disconnect`].
    pub fn disconnect(&mut self, conn: ConnectionId) -> (Departure, Outbox) {
        coordinator::disconnect(&mut self.store, conn)
    }

    pub fn store(&self) -> &SessionStore<R> {
        &self.store
    }

    /// The connections a recipient currently stands for.
    pub fn resolve(&self, recipient: Recipient) -> Vec<ConnectionId> {
        match recipient {
            Recipient::Connection(conn) => vec![conn],
            Recipient::Session(id) => self.store.participants(&id),
        }
    }

    pub fn snapshot(&self) -> LobbyInfo {
        LobbyInfo {
            accepted: self.matchmaker.accepted(),
            sessions: self.store.iter().map(Session::info).collect(),
        }
    }
}

/// Point-in-time view of the lobby.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyInfo {
    /// Connections admitted since start.
    pub accepted: u64,
    /// Live sessions, oldest first.
    pub sessions: Vec<SessionInfo>,
}

impl LobbyInfo {
    /// The session `conn` belonged to at snapshot time.
    pub fn session_of(&self, conn: ConnectionId) -> Option<&SessionInfo> {
        self.sessions.iter().find(|s| s.role_of(conn).is_some())
    }
}
