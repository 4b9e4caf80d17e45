//! Capture layer: drives a browser to scrape the three briefing sources.
//!
//! - [`session::BrowserSession`]: WebDriver client wrapper with a persistent
//!   Chrome profile (keeps the Google login alive between runs)
//! - [`sources`]: per-source scrape routines for Calendar, Gmail, and weather
//! - [`outcome`]: explicit per-source extracted/degraded results and the
//!   assembled report text consumed by the summarizer
//!
//! Extraction is best-effort by design: a source that fails to scrape shows
//! up as a placeholder line pointing at its screenshot, never as an error.
//! The one hard failure is an unreachable WebDriver endpoint.

pub mod outcome;
pub mod session;
pub mod sources;

use async_trait::async_trait;
use daybrief_common::Result;
use daybrief_config::{BrowserConfig, CaptureConfig};
use tracing::info;

use crate::outcome::CaptureReport;
use crate::session::BrowserSession;

/// Anything that can produce a capture report for one briefing cycle.
///
/// The web layer depends on this trait rather than on the concrete browser
/// capturer so handler tests can substitute a canned report.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn produce_report(&self) -> Result<CaptureReport>;
}

/// Browser-backed capturer: one WebDriver session per cycle, login persisted
/// through the Chrome profile directory.
pub struct DayCapturer {
    browser: BrowserConfig,
    capture: CaptureConfig,
}

impl DayCapturer {
    pub fn new(browser: BrowserConfig, capture: CaptureConfig) -> Self {
        Self { browser, capture }
    }
}

#[async_trait]
impl ReportSource for DayCapturer {
    async fn produce_report(&self) -> Result<CaptureReport> {
        // Connect failure is the precondition violation that propagates;
        // everything below degrades per source.
        let session = BrowserSession::connect(&self.browser).await?;

        let calendar = sources::capture_calendar(&session, &self.capture).await;
        let inbox = sources::capture_inbox(&session, &self.capture).await;
        let weather = sources::capture_weather(&session, &self.capture).await;

        session.close().await;

        let report = CaptureReport {
            calendar,
            inbox,
            weather,
        };
        info!(
            degraded = report.degraded_sources().len(),
            "capture cycle finished"
        );
        Ok(report)
    }
}
