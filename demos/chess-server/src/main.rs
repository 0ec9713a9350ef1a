use gambit::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_BIND: &str = "0.0.0.0:5000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=gambit_session=debug for per-move output
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .compact()
        .init();

    let bind = std::env::var("GAMBIT_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());

    let server = GambitServer::builder()
        .bind(&bind)
        .build::<StandardChess>()
        .await?;
    let lobby = server.lobby();

    tracing::info!(addr = %server.local_addr()?, "chess server listening");

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("ctrl-c received, shutting down");
            let _ = lobby.shutdown().await;
        }
    }

    Ok(())
}
