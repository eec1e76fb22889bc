//! tokenward service binary.
//!
//! - Loads `tokenward.yaml` (or the path given as first argument)
//! - Seeds the in-memory backends
//! - Serves `DELETE /v1/access-tokens/:id`, `/healthz`, `/metrics`

use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{fmt, EnvFilter};

use tokenward_service::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "tokenward-service stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "tokenward.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.service.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;

    // Log deletions for operators; real subscribers live out of process.
    let mut rx = state.backends().bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(ev) => tracing::info!(topic = ev.topic(), token_id = %ev.access_token.id, "event"),
                Err(RecvError::Lagged(n)) => tracing::warn!(skipped = n, "event log lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let app = router::build_router(state);

    tracing::info!(%listen, "tokenward-service starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
