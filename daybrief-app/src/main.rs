use std::sync::Arc;

use anyhow::Result;
use daybrief_capture::DayCapturer;
use daybrief_common::observability::{init_logging, LogConfig};
use daybrief_config::DaybriefConfigLoader;
use daybrief_web::{router, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // 1) Load config (env wins)
    let cfg = DaybriefConfigLoader::new().with_file("daybrief.yaml").load()?;

    let log_path = init_logging(LogConfig {
        emit_stderr: true,
        ..LogConfig::default()
    })?;
    info!(log_path = %log_path.display(), "logging initialised");

    tokio::fs::create_dir_all(&cfg.capture.screenshots_dir).await?;

    let bind = cfg.server.bind.clone();
    let screenshots_dir = cfg.capture.screenshots_dir.clone();
    let source = Arc::new(DayCapturer::new(cfg.browser, cfg.capture));
    let state = AppState::new(source, screenshots_dir);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(addr = %bind, "daybrief server listening");
    axum::serve(listener, router(state)).await?;

    Ok(())
}
