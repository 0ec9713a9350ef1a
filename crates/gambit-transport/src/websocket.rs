//! WebSocket transport implementation using `tokio-tungstenite`.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::{self, Message};

use crate::{Connection, ConnectionId, Incoming, Transport, TransportError};

type WsStream = WebSocketStream<TcpStream>;

/// How long a peer may take to send its upgrade request.
const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// A WebSocket-based [`Transport`] that listens for incoming connections.
///
/// Connection ids are allocated per transport, starting at 1, when the TCP
/// connection is accepted.
pub struct WebSocketTransport {
    listener: TcpListener,
    next_id: u64,
    handshake_timeout: Duration,
}

impl WebSocketTransport {
    /// Binds a new WebSocket transport to the given address.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(TransportError::AcceptFailed)?;
        tracing::info!(addr, "WebSocket transport listening");
        Ok(Self {
            listener,
            next_id: 1,
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
        })
    }

    /// Sets how long [`PendingWebSocket::establish`] waits for the upgrade.
    pub fn with_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = timeout;
        self
    }

    fn allocate_id(&mut self) -> ConnectionId {
        let id = ConnectionId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Transport for WebSocketTransport {
    type Incoming = PendingWebSocket;
    type Connection = WebSocketConnection;
    type Error = TransportError;

    async fn accept(&mut self) -> Result<Self::Incoming, Self::Error> {
        let (stream, peer) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::AcceptFailed)?;

        let id = self.allocate_id();
        tracing::debug!(%id, %peer, "accepted TCP connection");

        Ok(PendingWebSocket {
            id,
            peer,
            stream,
            timeout: self.handshake_timeout,
        })
    }

    fn local_addr(&self) -> Result<SocketAddr, Self::Error> {
        self.listener
            .local_addr()
            .map_err(TransportError::AcceptFailed)
    }
}

/// A TCP connection still waiting for its WebSocket upgrade.
pub struct PendingWebSocket {
    id: ConnectionId,
    peer: SocketAddr,
    stream: TcpStream,
    timeout: Duration,
}

impl PendingWebSocket {
    /// Returns the remote address of the peer.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }
}

impl Incoming for PendingWebSocket {
    type Connection = WebSocketConnection;
    type Error = TransportError;

    async fn establish(self) -> Result<Self::Connection, Self::Error> {
        let ws = tokio::time::timeout(self.timeout, tokio_tungstenite::accept_async(self.stream))
            .await
            .map_err(|_| {
                TransportError::AcceptFailed(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "WebSocket handshake timed out",
                ))
            })?
            .map_err(|e| {
                TransportError::AcceptFailed(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    e,
                ))
            })?;

        tracing::debug!(id = %self.id, peer = %self.peer, "WebSocket handshake complete");

        let (sink, stream) = ws.split();
        Ok(WebSocketConnection {
            id: self.id,
            peer: self.peer,
            sink: Mutex::new(sink),
            stream: Mutex::new(stream),
        })
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}

/// A single WebSocket connection.
///
/// The socket is split so a reader parked in `recv` never blocks a writer.
pub struct WebSocketConnection {
    id: ConnectionId,
    peer: SocketAddr,
    sink: Mutex<SplitSink<WsStream, Message>>,
    stream: Mutex<SplitStream<WsStream>>,
}

impl WebSocketConnection {
    /// Returns the remote address of the peer.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }
}

impl Connection for WebSocketConnection {
    type Error = TransportError;

    /// UTF-8 payloads go out as text frames (browsers read them directly),
    /// everything else as binary.
    async fn send(&self, data: &[u8]) -> Result<(), Self::Error> {
        let frame = match std::str::from_utf8(data) {
            Ok(text) => Message::Text(text.to_owned().into()),
            Err(_) => Message::Binary(data.to_vec().into()),
        };
        self.sink.lock().await.send(frame).await.map_err(write_error)
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error> {
        loop {
            let msg = self.stream.lock().await.next().await;
            match msg {
                Some(Ok(Message::Binary(data))) => {
                    return Ok(Some(data.into()));
                }
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(text.as_bytes().to_vec()));
                }
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue, // ping/pong/raw frame
                Some(Err(e)) => {
                    return Err(TransportError::ReceiveFailed(
                        std::io::Error::new(
                            std::io::ErrorKind::ConnectionReset,
                            e,
                        ),
                    ));
                }
            }
        }
    }

    async fn close(&self) -> Result<(), Self::Error> {
        self.sink.lock().await.close().await.map_err(write_error)
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}

fn write_error(e: tungstenite::Error) -> TransportError {
    match e {
        tungstenite::Error::ConnectionClosed
        | tungstenite::Error::AlreadyClosed => {
            TransportError::ConnectionClosed(e.to_string())
        }
        other => TransportError::SendFailed(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            other,
        )),
    }
}
