//! Per-connection handler.
//!
//! Each accepted connection gets its own Tokio task running this handler:
//!   1. Register with the lobby, which assigns a session and role
//!   2. Spawn a writer that drains lobby events onto the socket
//!   3. Loop: receive frames → decode → forward moves to the lobby

use std::sync::Arc;

use gambit_protocol::{ClientEvent, Codec, ServerEvent};
use gambit_session::LobbyHandle;
use gambit_transport::{Connection, ConnectionId, WebSocketConnection};
use tokio::sync::mpsc;

use crate::GambitError;
use crate::server::ServerState;

/// Drop guard that tells the lobby the connection is gone.
///
/// Fires even if the handler panics. `Drop` is synchronous, so the
/// disconnect is sent from a fire-and-forget task.
struct DisconnectGuard {
    conn_id: ConnectionId,
    lobby: LobbyHandle,
}

impl Drop for DisconnectGuard {
    fn drop(&mut self) {
        let conn_id = self.conn_id;
        let lobby = self.lobby.clone();
        tokio::spawn(async move {
            let _ = lobby.disconnect(conn_id).await;
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: WebSocketConnection,
    state: Arc<ServerState>,
) -> Result<(), GambitError> {
    let conn = Arc::new(conn);
    let conn_id = conn.id();

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let assignment = state.lobby.connect(conn_id, events_tx).await?;
    let _guard = DisconnectGuard {
        conn_id,
        lobby: state.lobby.clone(),
    };

    tracing::info!(
        %conn_id,
        session_id = %assignment.session_id,
        role = ?assignment.role,
        "connection joined session"
    );

    let writer = tokio::spawn(write_events(
        Arc::clone(&conn),
        Arc::clone(&state),
        events_rx,
    ));

    let result = read_events(&conn, &state).await;
    writer.abort();

    // _guard drops here → lobby disconnect fires.
    result
}

/// Reads frames until the peer goes away.
async fn read_events(
    conn: &WebSocketConnection,
    state: &ServerState,
) -> Result<(), GambitError> {
    let conn_id = conn.id();

    loop {
        let data = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::info!(%conn_id, "connection closed cleanly");
                return Ok(());
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                return Ok(());
            }
        };

        match state.codec.decode::<ClientEvent>(&data) {
            Ok(ClientEvent::SubmitMove(mv)) => {
                state.lobby.submit_move(conn_id, mv).await?;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "dropping undecodable frame");
            }
        }
    }
}

/// Forwards lobby events to the socket until either side closes.
async fn write_events(
    conn: Arc<WebSocketConnection>,
    state: Arc<ServerState>,
    mut events: mpsc::UnboundedReceiver<ServerEvent>,
) {
    while let Some(event) = events.recv().await {
        if let Err(e) = send_event(&conn, &state, &event).await {
            tracing::debug!(conn_id = %conn.id(), error = %e, "writer stopped");
            break;
        }
    }
}

async fn send_event(
    conn: &WebSocketConnection,
    state: &ServerState,
    event: &ServerEvent,
) -> Result<(), GambitError> {
    let bytes = state.codec.encode(event)?;
    conn.send(&bytes).await?;
    Ok(())
}
