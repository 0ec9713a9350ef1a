//! The lobby actor: one task that owns every session.
//!
//! Connection handlers never touch session state directly. They hold a
//! [`LobbyHandle`] and send it commands; the actor applies them one at a
//! time, so two moves in the same session can never interleave.

use std::collections::HashMap;

use gambit_protocol::{MoveDescriptor, ServerEvent};
use gambit_rules::RulesEngine;
use gambit_transport::ConnectionId;
use tokio::sync::{mpsc, oneshot};

use crate::{Assignment, Lobby, LobbyInfo, MatchmakingConfig, Outbox, SessionError};

/// Capacity of the lobby command channel.
const COMMAND_CHANNEL_SIZE: usize = 256;

/// Channel for pushing events to one connection's writer.
///
/// Unbounded so the actor never waits on a slow client.
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// Commands sent from connection handlers to the lobby actor.
enum LobbyCommand {
    Connect {
        conn: ConnectionId,
        sender: EventSender,
        reply: oneshot::Sender<Result<Assignment, SessionError>>,
    },
    SubmitMove {
        conn: ConnectionId,
        mv: MoveDescriptor,
    },
    Disconnect {
        conn: ConnectionId,
    },
    Info {
        reply: oneshot::Sender<LobbyInfo>,
    },
    Shutdown,
}

/// Handle to the running lobby actor.
///
/// Cheap to clone: it wraps an `mpsc::Sender`. Every method fails with
/// [`SessionError::Unavailable`] once the actor has stopped.
#[derive(Clone)]
pub struct LobbyHandle {
    sender: mpsc::Sender<LobbyCommand>,
}

impl LobbyHandle {
    /// Admits a connection and registers its outbound channel.
    ///
    /// The `role-assigned` and `board-state` events are already queued on
    /// `sender` when this returns.
    pub async fn connect(
        &self,
        conn: ConnectionId,
        sender: EventSender,
    ) -> Result<Assignment, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(LobbyCommand::Connect {
                conn,
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::Unavailable)?;
        reply_rx.await.map_err(|_| SessionError::Unavailable)?
    }

    /// Submits a move (fire-and-forget).
    pub async fn submit_move(
        &self,
        conn: ConnectionId,
        mv: MoveDescriptor,
    ) -> Result<(), SessionError> {
        self.sender
            .send(LobbyCommand::SubmitMove { conn, mv })
            .await
            .map_err(|_| SessionError::Unavailable)
    }

    /// Reports that a connection has gone away (fire-and-forget).
    pub async fn disconnect(&self, conn: ConnectionId) -> Result<(), SessionError> {
        self.sender
            .send(LobbyCommand::Disconnect { conn })
            .await
            .map_err(|_| SessionError::Unavailable)
    }

    /// Requests a snapshot of every session.
    pub async fn info(&self) -> Result<LobbyInfo, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(LobbyCommand::Info { reply: reply_tx })
            .await
            .map_err(|_| SessionError::Unavailable)?;
        reply_rx.await.map_err(|_| SessionError::Unavailable)
    }

    /// Stops the actor after the commands already queued.
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.sender
            .send(LobbyCommand::Shutdown)
            .await
            .map_err(|_| SessionError::Unavailable)
    }
}

struct LobbyActor<R: RulesEngine> {
    lobby: Lobby<R>,
    /// Per-connection outbound channels.
    senders: HashMap<ConnectionId, EventSender>,
    receiver: mpsc::Receiver<LobbyCommand>,
}

impl<R: RulesEngine> LobbyActor<R> {
    async fn run(mut self) {
        tracing::info!("lobby actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                LobbyCommand::Connect {
                    conn,
                    sender,
                    reply,
                } => {
                    let result = self.handle_connect(conn, sender);
                    let _ = reply.send(result);
                }
                LobbyCommand::SubmitMove { conn, mv } => {
                    let (_, outbox) = self.lobby.submit_move(conn, mv);
                    self.dispatch(outbox);
                }
                LobbyCommand::Disconnect { conn } => {
                    self.senders.remove(&conn);
                    let (_, outbox) = self.lobby.disconnect(conn);
                    self.dispatch(outbox);
                }
                LobbyCommand::Info { reply } => {
                    let _ = reply.send(self.lobby.snapshot());
                }
                LobbyCommand::Shutdown => {
                    tracing::info!("lobby shutting down");
                    break;
                }
            }
        }

        tracing::info!(
            sessions = self.lobby.store().len(),
            "lobby actor stopped"
        );
    }

    fn handle_connect(
        &mut self,
        conn: ConnectionId,
        sender: EventSender,
    ) -> Result<Assignment, SessionError> {
        let (assignment, outbox) = self.lobby.admit(conn)?;
        self.senders.insert(conn, sender);
        self.dispatch(outbox);
        Ok(assignment)
    }

    /// Delivers events after the mutation that produced them, so session
    /// recipients are resolved against the current membership.
    fn dispatch(&self, outbox: Outbox) {
        for (recipient, event) in outbox {
            for conn in self.lobby.resolve(recipient) {
                self.send_to(conn, event.clone());
            }
        }
    }

    /// Silently drops the event if the connection's writer is gone.
    fn send_to(&self, conn: ConnectionId, event: ServerEvent) {
        if let Some(sender) = self.senders.get(&conn) {
            let _ = sender.send(event);
        }
    }
}

/// Spawns the lobby actor on the current Tokio runtime.
pub fn spawn_lobby<R: RulesEngine>(config: MatchmakingConfig) -> LobbyHandle {
    let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);

    let actor = LobbyActor::<R> {
        lobby: Lobby::new(config),
        senders: HashMap::new(),
        receiver: rx,
    };

    tokio::spawn(actor.run());

    LobbyHandle { sender: tx }
}
