//! Wire protocol for Gambit.
//!
//! This crate defines the named events that travel between the server and
//! its clients:
//!
//! - **Types** ([`ServerEvent`], [`ClientEvent`], [`Role`],
//!   [`MoveDescriptor`]): the event vocabulary.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how events become frames.
//! - **Errors** ([`ProtocolError`]): what can go wrong while doing so.
//!
//! The protocol layer knows nothing about sessions or chess. A move is an
//! opaque [`MoveDescriptor`] here; only the rules engine interprets it.
//!
//! ```text
//! Transport (frames) → Protocol (events) → Session (roles, turns)
//! ```

mod codec;
mod error;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use types::{ClientEvent, MoveDescriptor, Role, ServerEvent};
