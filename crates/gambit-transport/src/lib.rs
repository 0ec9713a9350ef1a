//! Transport layer for Gambit.
//!
//! Provides the [`Transport`] and [`Connection`] traits the server is
//! written against, plus the [`ConnectionId`] every other layer uses to
//! refer to a connected client. The core never holds more about a
//! connection than this id.
//!
//! # Feature Flags
//!
//! - `websocket` (default): WebSocket transport via `tokio-tungstenite`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
#[cfg(feature = "websocket")]
pub use websocket::{PendingWebSocket, WebSocketConnection, WebSocketTransport};

use std::fmt;

/// Opaque identifier for a connection.
///
/// Allocated by the transport that accepted the connection. Ids are unique
/// for the lifetime of that transport and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Accepts new incoming connections.
///
/// `accept` only takes the connection off the listener. Any protocol
/// handshake happens in [`Incoming::establish`], so the caller can run it
/// off the accept loop and one slow peer never holds up the next.
pub trait Transport: Send + Sync + 'static {
    /// An accepted connection that has not finished its handshake.
    type Incoming: Incoming<Connection = Self::Connection, Error = Self::Error>;
    /// The connection type produced by this transport.
    type Connection: Connection;
    /// The error type for transport operations.
    type Error: std::error::Error + Send + Sync;

    /// Waits for and accepts the next incoming connection.
    async fn accept(&mut self) -> Result<Self::Incoming, Self::Error>;

    /// Returns the address the transport is listening on.
    fn local_addr(&self) -> Result<std::net::SocketAddr, Self::Error>;
}

/// A connection between accept and its completed handshake.
pub trait Incoming: Send + 'static {
    /// The connection produced once the handshake succeeds.
    type Connection: Connection;
    /// The error type for a failed handshake.
    type Error: std::error::Error + Send + Sync;

    /// Completes the handshake.
    async fn establish(self) -> Result<Self::Connection, Self::Error>;

    /// The id the established connection will carry.
    fn id(&self) -> ConnectionId;
}

/// A single connection that can send and receive frames.
///
/// Sending and receiving are independent: a task blocked in
/// [`recv`](Connection::recv) must not hold up a concurrent
/// [`send`](Connection::send) from another task.
pub trait Connection: Send + Sync + 'static {
    /// The error type for connection operations.
    type Error: std::error::Error + Send + Sync;

    /// Sends a frame to the remote peer.
    async fn send(&self, data: &[u8]) -> Result<(), Self::Error>;

    /// Receives the next frame from the remote peer.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Closes the connection.
    async fn close(&self) -> Result<(), Self::Error>;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}
