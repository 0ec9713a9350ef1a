//! Placement of new connections into sessions.

use gambit_protocol::{Role, ServerEvent};
use gambit_rules::RulesEngine;
use gambit_transport::ConnectionId;

use crate::{MatchmakingConfig, Outbox, Recipient, Session, SessionError, SessionId, SessionStore};

/// Where a connection was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub session_id: SessionId,
    pub role: Role,
}

/// Assigns every new connection a session and a role.
///
/// Placement, for the N-th accepted connection:
///
/// 1. If N is a multiple of `fresh_session_interval`, open a new session
///    with the connection in the first seat.
/// 2. Otherwise take the first session, oldest first, with an empty second
///    seat (as second player) or a free observer slot (as observer).
/// 3. If nothing fits, open a new session.
///
/// The joining connection receives `role-assigned` then `board-state`.
/// Nobody else is notified.
#[derive(Debug, Default)]
pub struct Matchmaker {
    accepted: u64,
    config: MatchmakingConfig,
}

impl Matchmaker {
    pub fn new(config: MatchmakingConfig) -> Self {
        Self {
            accepted: 0,
            config,
        }
    }

    /// Connections admitted so far. Never decreases.
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    pub fn config(&self) -> &MatchmakingConfig {
        &self.config
    }

    /// Places `conn` and returns the events it should receive.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyAssigned`] if `conn` is already in a session.
    /// The accepted count is not incremented in that case.
    pub fn admit<R: RulesEngine>(
        &mut self,
        store: &mut SessionStore<R>,
        conn: ConnectionId,
    ) -> Result<(Assignment, Outbox), SessionError> {
        if let Some(existing) = store.find_by_connection(conn) {
            return Err(SessionError::AlreadyAssigned(conn, existing));
        }

        self.accepted += 1;
        let interval = self.config.fresh_session_interval;
        let forced_fresh = interval != 0 && self.accepted % interval == 0;

        let assignment = if forced_fresh {
            open_session(store, conn)
        } else {
            match self.join_existing(store, conn) {
                Some(assignment) => assignment,
                None => open_session(store, conn),
            }
        };

        let position = store
            .get(&assignment.session_id)
            .map(Session::position)
            .unwrap_or_default();

        tracing::info!(
            %conn,
            session_id = %assignment.session_id,
            role = ?assignment.role,
            accepted = self.accepted,
            "connection assigned"
        );

        let outbox = vec![
            (
                Recipient::Connection(conn),
                ServerEvent::RoleAssigned(assignment.role),
            ),
            (Recipient::Connection(conn), ServerEvent::BoardState(position)),
        ];
        Ok((assignment, outbox))
    }

    fn join_existing<R>(
        &self,
        store: &mut SessionStore<R>,
        conn: ConnectionId,
    ) -> Option<Assignment> {
        let max_observers = self.config.max_observers;
        let (session_id, role) = store.iter().find_map(|session| {
            if session.state().has_open_second_seat() {
                Some((session.id(), Role::SecondPlayer))
            } else if session.observers().len() < max_observers {
                Some((session.id(), Role::Observer))
            } else {
                None
            }
        })?;

        let session = store.get_mut(&session_id)?;
        match role {
            Role::SecondPlayer => session.seat_second(conn),
            _ => session.add_observer(conn),
        }
        Some(Assignment { session_id, role })
    }
}

fn open_session<R: RulesEngine>(store: &mut SessionStore<R>, conn: ConnectionId) -> Assignment {
    let session_id = store.insert(Session::open(conn));
    tracing::info!(%session_id, first_player = %conn, "session created");
    Assignment {
        session_id,
        role: Role::FirstPlayer,
    }
}
