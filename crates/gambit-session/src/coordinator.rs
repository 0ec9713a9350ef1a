//! Move submission and disconnection for seated connections.
//!
//! Both operations look the connection up in the [`SessionStore`], mutate
//! at most one session, and return the events to deliver. Neither fails:
//! a connection that belongs nowhere is a quiet no-op.

use gambit_protocol::{MoveDescriptor, Role, ServerEvent};
use gambit_rules::{IllegalMove, MoveOutcome, RulesEngine, Side};
use gambit_transport::ConnectionId;

use crate::{Outbox, Recipient, SessionId, SessionStore};

/// What happened to a submitted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResolution {
    /// The submitter is not in any session. Nothing is sent.
    Unassigned,
    /// The submitter does not hold the seat for `side`, the side to move.
    /// Nothing is sent.
    OutOfTurn { side: Side },
    /// The move was played and broadcast.
    Applied,
    /// The engine refused the move; the submitter was told.
    Rejected(IllegalMove),
}

/// What a disconnect did to the session it left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Departure {
    /// The connection was not in any session.
    NotFound,
    /// The session was removed from the store.
    Destroyed(SessionId),
    /// The second player left and the first player took their seat.
    Promoted {
        session_id: SessionId,
        promoted: ConnectionId,
    },
    /// An observer left.
    ObserverLeft(SessionId),
}

/// Plays `mv` for `conn` if it holds the seat whose turn it is.
///
/// A legal move sends `move-applied` then `board-state` to everyone in the
/// session, mover included. An illegal or malformed one sends
/// `move-rejected` to the mover only, with the descriptor echoed verbatim.
pub fn submit_move<R: RulesEngine>(
    store: &mut SessionStore<R>,
    conn: ConnectionId,
    mv: MoveDescriptor,
) -> (MoveResolution, Outbox) {
    let Some(session_id) = store.find_by_connection(conn) else {
        tracing::debug!(%conn, %mv, "move from unassigned connection ignored");
        return (MoveResolution::Unassigned, Vec::new());
    };
    let Some(session) = store.get_mut(&session_id) else {
        return (MoveResolution::Unassigned, Vec::new());
    };

    let side = session.engine().side_to_move();
    if session.seat_holder(side) != Some(conn) {
        tracing::debug!(%conn, %session_id, %side, %mv, "move out of turn ignored");
        return (MoveResolution::OutOfTurn { side }, Vec::new());
    }

    match session.engine_mut().play(&mv) {
        MoveOutcome::Applied => {
            let position = session.position();
            tracing::debug!(%conn, %session_id, %side, %mv, "move applied");
            let everyone = Recipient::Session(session_id);
            (
                MoveResolution::Applied,
                vec![
                    (everyone, ServerEvent::MoveApplied(mv)),
                    (everyone, ServerEvent::BoardState(position)),
                ],
            )
        }
        MoveOutcome::Illegal(reason) => {
            tracing::debug!(%conn, %session_id, %mv, %reason, "move rejected");
            (
                MoveResolution::Rejected(reason),
                vec![(Recipient::Connection(conn), ServerEvent::MoveRejected(mv))],
            )
        }
    }
}

/// Removes `conn` from its session.
///
/// - First player: the session is destroyed. Nobody is notified.
/// - Second player: the first player (if any) moves into the second seat
///   and `role-changed(second-player)` goes to everyone left in the
///   session. With both seats empty the session is destroyed.
/// - Observer: removed; the remaining observers keep their order.
pub fn disconnect<R>(store: &mut SessionStore<R>, conn: ConnectionId) -> (Departure, Outbox) {
    let found = store
        .find_by_connection(conn)
        .and_then(|id| Some((id, store.get(&id)?.role_of(conn)?)));
    let Some((session_id, role)) = found else {
        tracing::debug!(%conn, "disconnect from unassigned connection");
        return (Departure::NotFound, Vec::new());
    };

    match role {
        Role::FirstPlayer => {
            store.remove(&session_id);
            tracing::info!(%conn, %session_id, "first player left, session destroyed");
            (Departure::Destroyed(session_id), Vec::new())
        }
        Role::SecondPlayer => {
            let promoted = store
                .get_mut(&session_id)
                .and_then(|session| session.vacate_second_seat());
            match promoted {
                Some(promoted) => {
                    tracing::info!(
                        %conn,
                        %session_id,
                        %promoted,
                        "second player left, first player promoted"
                    );
                    (
                        Departure::Promoted {
                            session_id,
                            promoted,
                        },
                        vec![(
                            Recipient::Session(session_id),
                            ServerEvent::RoleChanged(Role::SecondPlayer),
                        )],
                    )
                }
                None => {
                    store.remove(&session_id);
                    tracing::info!(%conn, %session_id, "last seat emptied, session destroyed");
                    (Departure::Destroyed(session_id), Vec::new())
                }
            }
        }
        Role::Observer => {
            if let Some(session) = store.get_mut(&session_id) {
                session.remove_observer(conn);
            }
            tracing::info!(%conn, %session_id, "observer left");
            (Departure::ObserverLeft(session_id), Vec::new())
        }
    }
}
