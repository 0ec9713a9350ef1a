//! Unified error type for Gambit.

use gambit_protocol::ProtocolError;
use gambit_session::SessionError;
use gambit_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// `#[from]` on each variant lets `?` convert sub-crate errors.
#[derive(Debug, thiserror::Error)]
pub enum GambitError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// An event could not be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The lobby refused or could not be reached.
    #[error(transparent)]
    Session(#[from] SessionError),
}
