//! Request handlers for the dashboard, trigger, and screenshot routes.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::{error, info};

use daybrief_capture::sources::SCREENSHOT_FILES;

use crate::AppState;

/// Maps any handler error onto a plain 500. The only expected producer is a
/// capture cycle that could not reach the browser.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = ?self.0, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("day plan failed: {}", self.0),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// `GET /`: the latest briefing plus whichever screenshots exist on disk.
pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    let briefing = state.store.get().await;

    let mut screenshots = Vec::new();
    for name in SCREENSHOT_FILES {
        if tokio::fs::try_exists(state.screenshots_dir.join(name))
            .await
            .unwrap_or(false)
        {
            screenshots.push(name);
        }
    }

    Html(render_dashboard(briefing.as_deref(), &screenshots))
}

/// `GET /run`: one synchronous capture-then-summarize cycle, then back to
/// the dashboard.
pub async fn run_day_plan(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let report = state.source.produce_report().await?;
    let briefing = daybrief_core::summarize(&report.to_report_text());

    info!(
        degraded = ?report.degraded_sources(),
        "day plan cycle complete"
    );
    state.store.set(briefing).await;

    Ok(Redirect::to("/"))
}

/// `GET /screenshots/{name}`: serve one capture PNG.
pub async fn screenshot(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    if !is_safe_screenshot_name(&name) {
        return (StatusCode::NOT_FOUND, "no such screenshot").into_response();
    }

    match tokio::fs::read(state.screenshots_dir.join(&name)).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "no such screenshot").into_response(),
    }
}

/// Plain file names only: no separators, no parent traversal.
fn is_safe_screenshot_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && !name.contains("..")
}

fn render_dashboard(briefing: Option<&str>, screenshots: &[&str]) -> String {
    let mut html = String::from(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>daybrief</title></head>\n<body>\n\
         <h1>Daily briefing</h1>\n\
         <p><a href=\"/run\">Run day plan</a></p>\n",
    );

    match briefing {
        Some(text) => {
            html.push_str("<pre>");
            html.push_str(&escape_html(text));
            html.push_str("</pre>\n");
        }
        None => html.push_str("<p><em>No briefing yet — run the day plan.</em></p>\n"),
    }

    if !screenshots.is_empty() {
        html.push_str("<h2>Screenshots</h2>\n");
        for name in screenshots {
            html.push_str(&format!(
                "<div><img src=\"/screenshots/{name}\" alt=\"{name}\" width=\"640\"></div>\n"
            ));
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AppState, BriefingStore};
    use async_trait::async_trait;
    use daybrief_capture::outcome::{CaptureReport, SourceOutcome};
    use daybrief_capture::ReportSource;
    use daybrief_common::DaybriefError;
    use std::sync::Arc;

    struct StubSource(CaptureReport);

    #[async_trait]
    impl ReportSource for StubSource {
        async fn produce_report(&self) -> daybrief_common::Result<CaptureReport> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ReportSource for FailingSource {
        async fn produce_report(&self) -> daybrief_common::Result<CaptureReport> {
            Err(DaybriefError::Session(anyhow::anyhow!(
                "webdriver unreachable at http://localhost:9515"
            )))
        }
    }

    fn sample_report() -> CaptureReport {
        CaptureReport {
            calendar: SourceOutcome::Extracted(vec!["9:30am – AI Standup".to_string()]),
            inbox: SourceOutcome::Extracted(vec![
                "boss@co.com: Please approve invoice today".to_string()
            ]),
            weather: SourceOutcome::Extracted(vec!["22°C, Sunny".to_string()]),
        }
    }

    fn state_with(source: Arc<dyn ReportSource>, dir: &std::path::Path) -> AppState {
        AppState {
            store: BriefingStore::new(),
            source,
            screenshots_dir: dir.to_path_buf(),
        }
    }

    #[tokio::test]
    async fn run_stores_the_rendered_briefing() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(Arc::new(StubSource(sample_report())), dir.path());

        let redirect = run_day_plan(State(state.clone())).await.expect("cycle runs");
        assert_eq!(redirect.into_response().status(), StatusCode::SEE_OTHER);

        let stored = state.store.get().await.expect("briefing stored");
        assert!(stored.contains("MEETINGS TODAY:\n  • 9:30am – AI Standup"));
        assert!(stored.contains("WEATHER:\n  • 22°C, Sunny"));
    }

    #[tokio::test]
    async fn rerun_overwrites_the_slot() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(Arc::new(StubSource(sample_report())), dir.path());

        state.store.set("old briefing".to_string()).await;
        let _redirect = run_day_plan(State(state.clone())).await.unwrap();

        let stored = state.store.get().await.unwrap();
        assert!(!stored.contains("old briefing"));
    }

    #[tokio::test]
    async fn session_failure_propagates_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(Arc::new(FailingSource), dir.path());

        let result = run_day_plan(State(state)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn dashboard_before_any_run_shows_the_notice() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(Arc::new(StubSource(sample_report())), dir.path());

        let Html(page) = dashboard(State(state)).await;
        assert!(page.contains("No briefing yet"));
        assert!(!page.contains("<pre>"));
    }

    #[tokio::test]
    async fn dashboard_renders_stored_briefing_and_existing_screenshots() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("calendar_today.png"), b"png").unwrap();

        let state = state_with(Arc::new(StubSource(sample_report())), dir.path());
        let _redirect = run_day_plan(State(state.clone())).await.unwrap();

        let Html(page) = dashboard(State(state)).await;
        assert!(page.contains("MEETINGS TODAY:"));
        // only the screenshot that exists on disk is listed
        assert!(page.contains("/screenshots/calendar_today.png"));
        assert!(!page.contains("/screenshots/inbox_unread.png"));
    }

    #[tokio::test]
    async fn screenshot_route_serves_png_and_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("weather.png"), b"png-bytes").unwrap();
        let state = state_with(Arc::new(StubSource(sample_report())), dir.path());

        let ok = screenshot(State(state.clone()), Path("weather.png".to_string()))
            .await
            .into_response();
        assert_eq!(ok.status(), StatusCode::OK);

        let missing = screenshot(State(state.clone()), Path("nope.png".to_string()))
            .await
            .into_response();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let traversal = screenshot(State(state), Path("../etc/passwd".to_string()))
            .await
            .into_response();
        assert_eq!(traversal.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn screenshot_names_are_validated() {
        assert!(is_safe_screenshot_name("weather.png"));
        assert!(!is_safe_screenshot_name(""));
        assert!(!is_safe_screenshot_name("../secret"));
        assert!(!is_safe_screenshot_name("a/b.png"));
        assert!(!is_safe_screenshot_name("a\\b.png"));
    }

    #[test]
    fn briefing_text_is_escaped_for_html() {
        let html = render_dashboard(Some("a <b> & \"c\""), &[]);
        assert!(html.contains("a &lt;b&gt; &amp; &quot;c&quot;"));
    }
}
