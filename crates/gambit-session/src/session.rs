//! A single game: two seats, a few observers, one rules engine.

use std::fmt;

use gambit_protocol::Role;
use gambit_rules::{RulesEngine, Side};
use gambit_transport::ConnectionId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::SessionState;

/// Unique identifier for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One chess game and the connections attached to it.
///
/// White belongs to the first seat and Black to the second. A connection
/// appears at most once across the seats and the observer list. Seat and
/// observer changes go through the [`Matchmaker`](crate::Matchmaker) and
/// the [`coordinator`](crate::coordinator) only.
#[derive(Debug)]
pub struct Session<R> {
    id: SessionId,
    engine: R,
    first_player: Option<ConnectionId>,
    second_player: Option<ConnectionId>,
    observers: Vec<ConnectionId>,
}

impl<R: RulesEngine> Session<R> {
    /// Opens a session with `first` in the first seat and a new game.
    pub(crate) fn open(first: ConnectionId) -> Self {
        Self {
            id: SessionId::new(),
            engine: R::new_game(),
            first_player: Some(first),
            second_player: None,
            observers: Vec::new(),
        }
    }

    /// The current position, as reported by the engine.
    pub fn position(&self) -> String {
        self.engine.position()
    }

    /// A point-in-time summary of this session.
    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id,
            state: self.state(),
            first_player: self.first_player,
            second_player: self.second_player,
            observers: self.observers.clone(),
            position: self.position(),
        }
    }
}

impl<R> Session<R> {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn first_player(&self) -> Option<ConnectionId> {
        self.first_player
    }

    pub fn second_player(&self) -> Option<ConnectionId> {
        self.second_player
    }

    pub fn observers(&self) -> &[ConnectionId] {
        &self.observers
    }

    pub fn engine(&self) -> &R {
        &self.engine
    }

    pub(crate) fn engine_mut(&mut self) -> &mut R {
        &mut self.engine
    }

    pub fn state(&self) -> SessionState {
        SessionState::from_seats(self.first_player.is_some(), self.second_player.is_some())
    }

    /// The role `conn` holds here, if any.
    pub fn role_of(&self, conn: ConnectionId) -> Option<Role> {
        if self.first_player == Some(conn) {
            Some(Role::FirstPlayer)
        } else if self.second_player == Some(conn) {
            Some(Role::SecondPlayer)
        } else if self.observers.contains(&conn) {
            Some(Role::Observer)
        } else {
            None
        }
    }

    pub fn contains(&self, conn: ConnectionId) -> bool {
        self.role_of(conn).is_some()
    }

    /// The connection allowed to move for `side`.
    pub fn seat_holder(&self, side: Side) -> Option<ConnectionId> {
        match side {
            Side::White => self.first_player,
            Side::Black => self.second_player,
        }
    }

    /// Everyone attached: seats first, then observers in join order.
    pub fn participants(&self) -> Vec<ConnectionId> {
        self.first_player
            .into_iter()
            .chain(self.second_player)
            .chain(self.observers.iter().copied())
            .collect()
    }

    pub(crate) fn seat_second(&mut self, conn: ConnectionId) {
        debug_assert!(self.second_player.is_none());
        self.second_player = Some(conn);
    }

    pub(crate) fn add_observer(&mut self, conn: ConnectionId) {
        self.observers.push(conn);
    }

    pub(crate) fn remove_observer(&mut self, conn: ConnectionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| *o != conn);
        self.observers.len() != before
    }

    /// Empties the second seat and moves the first player into it.
    ///
    /// Returns the promoted connection, or `None` when the first seat was
    /// already empty (the session is then abandoned).
    pub(crate) fn vacate_second_seat(&mut self) -> Option<ConnectionId> {
        self.second_player = self.first_player.take();
        self.second_player
    }
}

/// Snapshot of a session, as returned by [`Session::info`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub id: SessionId,
    pub state: SessionState,
    pub first_player: Option<ConnectionId>,
    pub second_player: Option<ConnectionId>,
    pub observers: Vec<ConnectionId>,
    pub position: String,
}

impl SessionInfo {
    /// The role `conn` held when the snapshot was taken.
    pub fn role_of(&self, conn: ConnectionId) -> Option<Role> {
        if self.first_player == Some(conn) {
            Some(Role::FirstPlayer)
        } else if self.second_player == Some(conn) {
            Some(Role::SecondPlayer)
        } else if self.observers.contains(&conn) {
            Some(Role::Observer)
        } else {
            None
        }
    }
}
