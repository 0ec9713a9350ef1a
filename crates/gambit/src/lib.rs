//! # Gambit
//!
//! Multiplayer chess over WebSocket with automatic matchmaking.
//!
//! Every client that connects is placed into a game on its own: it takes
//! the open seat of an existing game, watches one as an observer, or starts
//! a new one. Seated players submit moves; a [`RulesEngine`] decides which
//! are legal and everyone in the game sees the result.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gambit::prelude::*;
//!
//! # async fn run() -> Result<(), GambitError> {
//! let server = GambitServer::builder()
//!     .bind("0.0.0.0:5000")
//!     .build::<StandardChess>()
//!     .await?;
//! server.run().await
//! # }
//! ```
//!
//! [`RulesEngine`]: gambit_rules::RulesEngine

mod error;
mod handler;
mod server;

pub use error::GambitError;
pub use server::{GambitServer, GambitServerBuilder};

pub use gambit_protocol as protocol;
pub use gambit_rules as rules;
pub use gambit_session as session;
pub use gambit_transport as transport;

/// The types most servers and tests need.
pub mod prelude {
    pub use crate::{GambitError, GambitServer, GambitServerBuilder};
    pub use gambit_protocol::{ClientEvent, MoveDescriptor, Role, ServerEvent};
    pub use gambit_rules::{MoveOutcome, RulesEngine, Side, StandardChess};
    pub use gambit_session::{LobbyHandle, LobbyInfo, MatchmakingConfig, SessionState};
}
