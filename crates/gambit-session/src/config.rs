//! Matchmaking configuration and the session state machine.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MatchmakingConfig
// ---------------------------------------------------------------------------

/// Tunables for the [`Matchmaker`](crate::Matchmaker).
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchmakingConfig {
    /// Every connection whose accepted-count is a multiple of this opens a
    /// brand-new session, even if other sessions have open seats.
    /// 0 disables the rule.
    pub fresh_session_interval: u64,

    /// Observer slots per session.
    pub max_observers: usize,
}

impl Default for MatchmakingConfig {
    fn default() -> Self {
        Self {
            fresh_session_interval: 3,
            max_observers: 2,
        }
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Seat occupancy of a session.
///
/// ```text
/// (create) → OpenSecondSeat → Full → SecondSeatOnly → (destroyed)
///                  │            │          ↑
///                  │            └──────────┘  second player leaves,
///                  │                          first is promoted
///                  └── first player leaves, from any state → (destroyed)
/// ```
///
/// - **OpenSecondSeat**: first seat taken, waiting for an opponent.
/// - **Full**: both seats taken.
/// - **SecondSeatOnly**: after a promotion swap. The first seat stays empty
///   for the rest of the session.
/// - **Abandoned**: both seats empty. Never persisted; the coordinator
///   destroys the session as soon as it gets here.
///
/// Observers come and go without changing the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    OpenSecondSeat,
    Full,
    SecondSeatOnly,
    Abandoned,
}

impl SessionState {
    /// Derives the state from which seats are taken.
    pub fn from_seats(first_taken: bool, second_taken: bool) -> Self {
        match (first_taken, second_taken) {
            (true, false) => Self::OpenSecondSeat,
            (true, true) => Self::Full,
            (false, true) => Self::SecondSeatOnly,
            (false, false) => Self::Abandoned,
        }
    }

    /// Returns `true` if a new connection can take the second seat.
    pub fn has_open_second_seat(&self) -> bool {
        matches!(self, Self::OpenSecondSeat)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenSecondSeat => write!(f, "OpenSecondSeat"),
            Self::Full => write!(f, "Full"),
            Self::SecondSeatOnly => write!(f, "SecondSeatOnly"),
            Self::Abandoned => write!(f, "Abandoned"),
        }
    }
}
