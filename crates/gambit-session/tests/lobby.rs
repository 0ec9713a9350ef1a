//! Integration tests for the lobby actor with standard chess rules.

use gambit_protocol::{MoveDescriptor, Role, ServerEvent};
use gambit_rules::StandardChess;
use gambit_session::{
    LobbyHandle, MatchmakingConfig, SessionError, SessionState, spawn_lobby,
};
use gambit_transport::ConnectionId;
use serde_json::json;
use tokio::sync::mpsc;

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";

// =========================================================================
// Helpers
// =========================================================================

struct Client {
    conn: ConnectionId,
    events: mpsc::UnboundedReceiver<ServerEvent>,
}

impl Client {
    /// Everything queued for this client so far.
    fn drain(&mut self) -> Vec<ServerEvent> {
        let mut out = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            out.push(event);
        }
        out
    }
}

async fn join(lobby: &LobbyHandle, n: u64) -> (Client, Role) {
    let conn = ConnectionId::new(n);
    let (tx, rx) = mpsc::unbounded_channel();
    let assignment = lobby.connect(conn, tx).await.unwrap();
    (Client { conn, events: rx }, assignment.role)
}

/// Waits until every previously sent command has been processed.
async fn settle(lobby: &LobbyHandle) {
    lobby.info().await.unwrap();
}

fn mv(value: serde_json::Value) -> MoveDescriptor {
    MoveDescriptor::new(value)
}

// =========================================================================
// Admission
// =========================================================================

#[tokio::test]
async fn test_connect_queues_role_then_board() {
    let lobby = spawn_lobby::<StandardChess>(MatchmakingConfig::default());
    let (mut c1, role) = join(&lobby, 1).await;

    assert_eq!(role, Role::FirstPlayer);
    assert_eq!(
        c1.drain(),
        vec![
            ServerEvent::RoleAssigned(Role::FirstPlayer),
            ServerEvent::BoardState(START.into()),
        ]
    );
}

#[tokio::test]
async fn test_joining_does_not_notify_existing_participants() {
    let lobby = spawn_lobby::<StandardChess>(MatchmakingConfig::default());
    let (mut c1, _) = join(&lobby, 1).await;
    c1.drain();

    let (_c2, role) = join(&lobby, 2).await;
    assert_eq!(role, Role::SecondPlayer);
    settle(&lobby).await;
    assert!(c1.drain().is_empty());
}

#[tokio::test]
async fn test_three_connections_make_two_sessions() {
    let lobby = spawn_lobby::<StandardChess>(MatchmakingConfig::default());
    let (c1, r1) = join(&lobby, 1).await;
    let (c2, r2) = join(&lobby, 2).await;
    let (c3, r3) = join(&lobby, 3).await;

    assert_eq!(
        (r1, r2, r3),
        (Role::FirstPlayer, Role::SecondPlayer, Role::FirstPlayer)
    );

    let info = lobby.info().await.unwrap();
    assert_eq!(info.accepted, 3);
    assert_eq!(info.sessions.len(), 2);
    assert_eq!(info.sessions[0].first_player, Some(c1.conn));
    assert_eq!(info.sessions[0].second_player, Some(c2.conn));
    assert_eq!(info.sessions[1].first_player, Some(c3.conn));
}

#[tokio::test]
async fn test_duplicate_connect_is_refused() {
    let lobby = spawn_lobby::<StandardChess>(MatchmakingConfig::default());
    let (c1, _) = join(&lobby, 1).await;

    let (tx, _rx) = mpsc::unbounded_channel();
    let err = lobby.connect(c1.conn, tx).await.unwrap_err();
    assert!(matches!(err, SessionError::AlreadyAssigned(c, _) if c == c1.conn));
    assert_eq!(lobby.info().await.unwrap().accepted, 1);
}

// =========================================================================
// Moves
// =========================================================================

#[tokio::test]
async fn test_legal_move_reaches_every_participant() {
    let lobby = spawn_lobby::<StandardChess>(MatchmakingConfig {
        fresh_session_interval: 0,
        ..MatchmakingConfig::default()
    });
    let (mut c1, _) = join(&lobby, 1).await;
    let (mut c2, _) = join(&lobby, 2).await;
    let (mut c3, role) = join(&lobby, 3).await;
    assert_eq!(role, Role::Observer);
    for c in [&mut c1, &mut c2, &mut c3] {
        c.drain();
    }

    let opening = mv(json!({"from": "e2", "to": "e4"}));
    lobby.submit_move(c1.conn, opening.clone()).await.unwrap();
    settle(&lobby).await;

    let expected = vec![
        ServerEvent::MoveApplied(opening),
        ServerEvent::BoardState(AFTER_E4.into()),
    ];
    assert_eq!(c1.drain(), expected);
    assert_eq!(c2.drain(), expected);
    assert_eq!(c3.drain(), expected);
}

#[tokio::test]
async fn test_illegal_move_rejected_to_submitter_only() {
    let lobby = spawn_lobby::<StandardChess>(MatchmakingConfig::default());
    let (mut c1, _) = join(&lobby, 1).await;
    let (mut c2, _) = join(&lobby, 2).await;
    c1.drain();
    c2.drain();

    let bad = mv(json!({"from": "e2", "to": "e5"}));
    lobby.submit_move(c1.conn, bad.clone()).await.unwrap();
    settle(&lobby).await;

    assert_eq!(c1.drain(), vec![ServerEvent::MoveRejected(bad)]);
    assert!(c2.drain().is_empty());
    assert_eq!(lobby.info().await.unwrap().sessions[0].position, START);
}

#[tokio::test]
async fn test_out_of_turn_move_is_silent() {
    let lobby = spawn_lobby::<StandardChess>(MatchmakingConfig::default());
    let (mut c1, _) = join(&lobby, 1).await;
    let (mut c2, _) = join(&lobby, 2).await;
    c1.drain();
    c2.drain();

    lobby.submit_move(c2.conn, mv(json!("e5"))).await.unwrap();
    settle(&lobby).await;

    assert!(c1.drain().is_empty());
    assert!(c2.drain().is_empty());
    assert_eq!(lobby.info().await.unwrap().sessions[0].position, START);
}

#[tokio::test]
async fn test_move_from_unknown_connection_is_ignored() {
    let lobby = spawn_lobby::<StandardChess>(MatchmakingConfig::default());
    let (mut c1, _) = join(&lobby, 1).await;
    c1.drain();

    lobby
        .submit_move(ConnectionId::new(77), mv(json!("e4")))
        .await
        .unwrap();
    settle(&lobby).await;
    assert!(c1.drain().is_empty());
}

// =========================================================================
// Disconnection
// =========================================================================

#[tokio::test]
async fn test_first_player_disconnect_destroys_session() {
    let lobby = spawn_lobby::<StandardChess>(MatchmakingConfig::default());
    let (c1, _) = join(&lobby, 1).await;
    let (mut c2, _) = join(&lobby, 2).await;
    c2.drain();

    lobby.disconnect(c1.conn).await.unwrap();
    let info = lobby.info().await.unwrap();

    assert!(info.sessions.is_empty());
    assert!(info.session_of(c2.conn).is_none());
    assert!(c2.drain().is_empty());
}

#[tokio::test]
async fn test_second_player_disconnect_promotes_first_and_tells_session() {
    let lobby = spawn_lobby::<StandardChess>(MatchmakingConfig {
        fresh_session_interval: 0,
        ..MatchmakingConfig::default()
    });
    let (mut c1, _) = join(&lobby, 1).await;
    let (c2, _) = join(&lobby, 2).await;
    let (mut c3, _) = join(&lobby, 3).await;
    c1.drain();
    c3.drain();

    lobby.disconnect(c2.conn).await.unwrap();
    let info = lobby.info().await.unwrap();
    let session = &info.sessions[0];

    assert_eq!(session.state, SessionState::SecondSeatOnly);
    assert_eq!(session.first_player, None);
    assert_eq!(session.second_player, Some(c1.conn));
    let notice = vec![ServerEvent::RoleChanged(Role::SecondPlayer)];
    assert_eq!(c1.drain(), notice);
    assert_eq!(c3.drain(), notice);
}

#[tokio::test]
async fn test_promoted_player_leaving_destroys_session() {
    let lobby = spawn_lobby::<StandardChess>(MatchmakingConfig::default());
    let (c1, _) = join(&lobby, 1).await;
    let (c2, _) = join(&lobby, 2).await;

    lobby.disconnect(c2.conn).await.unwrap();
    lobby.disconnect(c1.conn).await.unwrap();

    assert!(lobby.info().await.unwrap().sessions.is_empty());
}

#[tokio::test]
async fn test_disconnected_connection_receives_nothing() {
    let lobby = spawn_lobby::<StandardChess>(MatchmakingConfig {
        fresh_session_interval: 0,
        ..MatchmakingConfig::default()
    });
    let (c1, _) = join(&lobby, 1).await;
    let (_c2, _) = join(&lobby, 2).await;
    let (mut c3, _) = join(&lobby, 3).await;
    c3.drain();

    lobby.disconnect(c3.conn).await.unwrap();
    lobby.submit_move(c1.conn, mv(json!("e4"))).await.unwrap();
    settle(&lobby).await;

    assert!(c3.drain().is_empty());
}

#[tokio::test]
async fn test_unknown_disconnect_is_noop() {
    let lobby = spawn_lobby::<StandardChess>(MatchmakingConfig::default());
    join(&lobby, 1).await;
    lobby.disconnect(ConnectionId::new(99)).await.unwrap();
    assert_eq!(lobby.info().await.unwrap().sessions.len(), 1);
}

// =========================================================================
// Shutdown
// =========================================================================

#[tokio::test]
async fn test_handle_unavailable_after_shutdown() {
    let lobby = spawn_lobby::<StandardChess>(MatchmakingConfig::default());
    lobby.shutdown().await.unwrap();

    let (tx, _rx) = mpsc::unbounded_channel();
    let err = lobby.connect(ConnectionId::new(1), tx).await.unwrap_err();
    assert!(matches!(err, SessionError::Unavailable));
}
