//! The `RulesEngine` trait: the seam between sessions and chess rules.

use std::fmt;

use gambit_protocol::MoveDescriptor;

/// A side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => write!(f, "white"),
            Self::Black => write!(f, "black"),
        }
    }
}

/// Why a submitted move was not played.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMove {
    /// The descriptor could not be understood as a move at all.
    #[error("malformed move: {0}")]
    Malformed(String),

    /// The descriptor names a move, but not a legal one in this position.
    #[error("illegal move: {0}")]
    NotLegal(String),
}

/// Result of asking the engine to play a move.
///
/// Illegal and malformed moves are ordinary outcomes, not errors: the
/// caller branches on them and the engine's position is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was legal and the position advanced.
    Applied,
    /// The move was refused; the position is unchanged.
    Illegal(IllegalMove),
}

impl MoveOutcome {
    /// Returns `true` if the move was played.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// A chess position plus the rules to advance it.
///
/// Each session owns exactly one engine from creation to destruction and is
/// the only caller, so implementations need `Send` (the owning task may move
/// between threads) but not `Sync`.
pub trait RulesEngine: Send + 'static {
    /// Creates an engine holding the starting position.
    fn new_game() -> Self
    where
        Self: Sized;

    /// The side whose turn it is.
    fn side_to_move(&self) -> Side;

    /// Plays `mv` if it is legal in the current position.
    ///
    /// Must not panic on any descriptor: unparseable input is reported as
    /// [`IllegalMove::Malformed`].
    fn play(&mut self, mv: &MoveDescriptor) -> MoveOutcome;

    /// The current position in standard notation (FEN).
    fn position(&self) -> String;
}
