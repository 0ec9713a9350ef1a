//! Chess rules for Gambit.
//!
//! The session layer never implements chess itself. It talks to a
//! [`RulesEngine`]: one instance per session, asked whose turn it is, asked
//! to play a submitted move, and asked for the resulting position string.
//!
//! # Key types
//!
//! - [`RulesEngine`]: the trait a rules implementation provides
//! - [`MoveOutcome`]: legal/illegal result of playing a move
//! - [`StandardChess`]: standard chess backed by `shakmaty`

mod engine;
mod standard;

pub use engine::{IllegalMove, MoveOutcome, RulesEngine, Side};
pub use standard::{InvalidPosition, StandardChess};
