//! Addressed outbound events.

use gambit_protocol::ServerEvent;
use gambit_transport::ConnectionId;

use crate::SessionId;

/// Who should receive an outbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    /// One connection.
    Connection(ConnectionId),

    /// Everyone in the session (both seats and all observers), resolved
    /// when the event is delivered.
    Session(SessionId),
}

/// Events produced by one operation, in delivery order.
pub type Outbox = Vec<(Recipient, ServerEvent)>;
