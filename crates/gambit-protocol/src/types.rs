//! Event types for Gambit's wire format.
//!
//! Every frame carries exactly one named event, written as an adjacently
//! tagged JSON object:
//!
//! ```text
//! { "event": "board-state", "data": "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1" }
//! ```
//!
//! Event names are kebab-case so browser clients can switch on them
//! directly.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The part a connection plays in its session.
///
/// The first player holds the white seat and the second player the black
/// seat. Observers receive every board update but may not move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    FirstPlayer,
    SecondPlayer,
    Observer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstPlayer => write!(f, "first-player"),
            Self::SecondPlayer => write!(f, "second-player"),
            Self::Observer => write!(f, "observer"),
        }
    }
}

// ---------------------------------------------------------------------------
// MoveDescriptor
// ---------------------------------------------------------------------------

/// A move as submitted by a client.
///
/// Opaque to everything except the rules engine: the server forwards it
/// verbatim in `move-applied` and `move-rejected`, so clients get back
/// exactly what they sent. `#[serde(transparent)]` keeps it as the bare
/// JSON value on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveDescriptor(serde_json::Value);

impl MoveDescriptor {
    /// Wraps a raw JSON value.
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Borrows the raw JSON value.
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Unwraps the raw JSON value.
    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for MoveDescriptor {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Displays as compact JSON, for logs.
impl fmt::Display for MoveDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Events the server sends to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Sent once, immediately after the connection joins a session.
    RoleAssigned(Role),

    /// The session's position in FEN. Sent on join and after every
    /// accepted move.
    BoardState(String),

    /// A move was accepted. Broadcast to the whole session, mover included.
    MoveApplied(MoveDescriptor),

    /// The submitted move was illegal or malformed. Sent to the submitter
    /// only.
    MoveRejected(MoveDescriptor),

    /// The first player was promoted into the second seat. Broadcast to the
    /// whole session; the payload is the promoted connection's new role.
    RoleChanged(Role),
}

/// Events a client sends to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Ask the server to play a move on the client's behalf.
    SubmitMove(MoveDescriptor),
}

// =========================================================================
// Tests
// =========================================================================
