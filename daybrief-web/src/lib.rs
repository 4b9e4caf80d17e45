//! HTTP surface for the daybrief server.
//!
//! Three routes, all GET: `/` renders the last briefing plus whichever
//! screenshots exist on disk, `/run` performs one synchronous
//! capture-then-summarize cycle and redirects back to `/`, and
//! `/screenshots/{name}` serves the capture PNGs.
//!
//! The latest briefing lives in an injected [`BriefingStore`] on
//! [`AppState`], not in a process global. One trigger in flight at a time is
//! assumed; overlapping `/run` requests would contend for the same browser
//! profile and are not guarded against.

pub mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use daybrief_capture::ReportSource;

/// Single-slot store for the most recent briefing, overwritten each cycle.
#[derive(Clone, Default)]
pub struct BriefingStore {
    slot: Arc<RwLock<Option<String>>>,
}

impl BriefingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the current briefing, if any cycle has run yet.
    pub async fn get(&self) -> Option<String> {
        self.slot.read().await.clone()
    }

    /// Replace the stored briefing. Last write wins.
    pub async fn set(&self, briefing: String) {
        *self.slot.write().await = Some(briefing);
    }
}

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: BriefingStore,
    pub source: Arc<dyn ReportSource>,
    pub screenshots_dir: PathBuf,
}

impl AppState {
    pub fn new(source: Arc<dyn ReportSource>, screenshots_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: BriefingStore::new(),
            source,
            screenshots_dir: screenshots_dir.into(),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/run", get(handlers::run_day_plan))
        .route("/screenshots/{name}", get(handlers::screenshot))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
