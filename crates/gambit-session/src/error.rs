//! Error types for the session layer.

use gambit_transport::ConnectionId;

use crate::SessionId;

/// Errors that can occur during session operations.
///
/// Move and disconnect problems are not errors: they are outcomes
/// ([`MoveResolution`](crate::MoveResolution),
/// [`Departure`](crate::Departure)) that never escape a single connection.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The connection already has a place in a session.
    #[error("{0} is already in session {1}")]
    AlreadyAssigned(ConnectionId, SessionId),

    /// The lobby actor has stopped or its command channel is closed.
    #[error("lobby is unavailable")]
    Unavailable,
}
