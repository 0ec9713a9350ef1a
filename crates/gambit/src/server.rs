//! `GambitServer` builder and accept loop.
//!
//! Ties the layers together: transport → protocol → lobby.

use std::net::SocketAddr;
use std::sync::Arc;

use gambit_protocol::JsonCodec;
use gambit_rules::RulesEngine;
use gambit_session::{LobbyHandle, MatchmakingConfig, spawn_lobby};
use gambit_transport::{Incoming, Transport, WebSocketTransport};

use crate::GambitError;
use crate::handler::handle_connection;

/// Shared state handed to each connection task.
pub(crate) struct ServerState {
    pub(crate) lobby: LobbyHandle,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting a Gambit server.
///
/// ```rust,ignore
/// let server = GambitServer::builder()
///     .bind("0.0.0.0:5000")
///     .matchmaking(MatchmakingConfig { max_observers: 4, ..Default::default() })
///     .build::<StandardChess>()
///     .await?;
/// ```
pub struct GambitServerBuilder {
    bind_addr: String,
    matchmaking: MatchmakingConfig,
}

impl GambitServerBuilder {
    /// Creates a builder bound to `127.0.0.1:5000` with default matchmaking.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
            matchmaking: MatchmakingConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the matchmaking rules.
    pub fn matchmaking(mut self, config: MatchmakingConfig) -> Self {
        self.matchmaking = config;
        self
    }

    /// Binds the listener and starts the lobby actor.
    ///
    /// `R` is the rules engine every new session is created with.
    pub async fn build<R: RulesEngine>(self) -> Result<GambitServer, GambitError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;
        let lobby = spawn_lobby::<R>(self.matchmaking);

        let state = Arc::new(ServerState {
            lobby,
            codec: JsonCodec,
        });

        Ok(GambitServer { transport, state })
    }
}

impl Default for GambitServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Gambit server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct GambitServer {
    transport: WebSocketTransport,
    state: Arc<ServerState>,
}

impl GambitServer {
    /// Creates a new builder.
    pub fn builder() -> GambitServerBuilder {
        GambitServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, GambitError> {
        Ok(self.transport.local_addr()?)
    }

    /// A handle to the lobby, for inspection or shutdown.
    pub fn lobby(&self) -> LobbyHandle {
        self.state.lobby.clone()
    }

    /// Runs the accept loop.
    ///
    /// Spawns a task for each connection that completes the WebSocket
    /// upgrade and then runs its handler, so a peer that stalls the upgrade
    /// only stalls itself. Runs until the task is dropped or the process
    /// exits; accept failures are logged and do not stop the loop.
    pub async fn run(mut self) -> Result<(), GambitError> {
        tracing::info!(addr = ?self.transport.local_addr().ok(), "Gambit server running");

        loop {
            match self.transport.accept().await {
                Ok(incoming) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        let conn_id = incoming.id();
                        let conn = match incoming.establish().await {
                            Ok(conn) => conn,
                            Err(e) => {
                                tracing::debug!(%conn_id, error = %e, "handshake failed");
                                return;
                            }
                        };
                        tracing::info!(
                            %conn_id,
                            peer = %conn.peer_addr(),
                            "connection accepted"
                        );
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(%conn_id, error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
