//! Codec trait and the JSON implementation.
//!
//! A codec converts between Rust values and frame bytes. The server holds
//! one codec and uses it for every connection, so swapping the wire format
//! means swapping the codec and nothing else.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes values to frame bytes and decodes them back.
///
/// `Send + Sync + 'static` because a single codec is shared by every
/// connection task for the life of the server.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if the value cannot be represented.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the bytes are malformed or do
    /// not match `T`.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

/// A [`Codec`] that speaks JSON via `serde_json`.
///
/// JSON frames are what browser clients consume, and they stay readable
/// in DevTools.
///
/// ```rust
/// use gambit_protocol::{Codec, JsonCodec, Role, ServerEvent};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&ServerEvent::RoleAssigned(Role::Observer)).unwrap();
/// assert_eq!(bytes, br#"{"event":"role-assigned","data":"observer"}"#);
///
/// let back: ServerEvent = codec.decode(&bytes).unwrap();
/// assert_eq!(back, ServerEvent::RoleAssigned(Role::Observer));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientEvent, MoveDescriptor};

    #[test]
    fn test_decode_submit_move() {
        let frame = br#"{"event":"submit-move","data":{"from":"e2","to":"e4"}}"#;
        let event: ClientEvent = JsonCodec.decode(frame).unwrap();
        assert_eq!(
            event,
            ClientEvent::SubmitMove(MoveDescriptor::new(
                serde_json::json!({"from": "e2", "to": "e4"})
            ))
        );
    }

    #[test]
    fn test_decode_garbage_is_decode_error() {
        let result: Result<ClientEvent, _> = JsonCodec.decode(b"not json");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_unknown_event_is_decode_error() {
        let result: Result<ClientEvent, _> =
            JsonCodec.decode(br#"{"event":"resign","data":null}"#);
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }
}
