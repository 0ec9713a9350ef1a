//! Session lifecycle and matchmaking for Gambit.
//!
//! A session is one chess game: two seats and up to two observers, plus
//! the rules engine that owns the position. This crate decides who sits
//! where, who may move, and what happens when someone leaves.
//!
//! # Key types
//!
//! - [`SessionStore`]: every live session, in creation order
//! - [`Matchmaker`]: places each new connection into a session and role
//! - [`coordinator`]: move submission and disconnection for seated
//!   connections
//! - [`Lobby`]: the above, owned together
//! - [`LobbyHandle`]: send commands to the lobby actor, the single task
//!   that owns all session state
//!
//! Every operation returns an [`Outbox`]: the events it produced and who
//! should receive them. Delivering them is the actor's job.

pub mod coordinator;

mod actor;
mod config;
mod error;
mod lobby;
mod matchmaker;
mod outbox;
mod session;
mod store;

#[cfg(test)]
mod testing;

pub use actor::{EventSender, LobbyHandle, spawn_lobby};
pub use config::{MatchmakingConfig, SessionState};
pub use coordinator::{Departure, MoveResolution};
pub use error::SessionError;
pub use lobby::{Lobby, LobbyInfo};
pub use matchmaker::{Assignment, Matchmaker};
pub use outbox::{Outbox, Recipient};
pub use session::{Session, SessionId, SessionInfo};
pub use store::SessionStore;
