//! Per-source scrape routines and their text cleanup helpers.
//!
//! Each capture navigates, waits for the page to settle, screenshots it for
//! the dashboard, then pulls text out of the DOM. The selectors are
//! best-effort matches against Google's current markup; when they stop
//! matching, the source degrades to its placeholder and the screenshot is
//! what the user falls back on.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};
use url::Url;

use daybrief_config::CaptureConfig;

use crate::outcome::SourceOutcome;
use crate::session::{BrowserSession, SessionElement};

pub const CALENDAR_SCREENSHOT: &str = "calendar_today.png";
pub const INBOX_SCREENSHOT: &str = "inbox_unread.png";
pub const WEATHER_SCREENSHOT: &str = "weather.png";

/// Dashboard display order.
pub const SCREENSHOT_FILES: [&str; 3] =
    [CALENDAR_SCREENSHOT, INBOX_SCREENSHOT, WEATHER_SCREENSHOT];

pub const CALENDAR_PLACEHOLDER: &str =
    "(No meetings detected today — see screenshot calendar_today.png)";
pub const INBOX_PLACEHOLDER: &str =
    "(No unread email text captured — see screenshot inbox_unread.png)";
pub const WEATHER_PLACEHOLDER: &str = "(Weather parse failed — see screenshot weather.png)";

// /r/day loads "today" for the active account.
const CALENDAR_DAY_URL: &str = "https://calendar.google.com/calendar/u/0/r/day";
const INBOX_URL: &str = "https://mail.google.com/mail/u/0/#inbox";
const SEARCH_URL: &str = "https://www.google.com/search";

/// Overlay calendars that show up as events in day view but are never
/// meetings.
const JUNK_CALENDAR_TITLES: [&str; 5] = [
    "birthdays",
    "holidays in australia",
    "tasks",
    "reminders",
    "to-do",
];

/// Scrape today's meetings from Google Calendar day view.
pub async fn capture_calendar(session: &BrowserSession, config: &CaptureConfig) -> SourceOutcome {
    match scrape_calendar(session, config).await {
        Ok(events) => {
            info!(events = events.len(), "calendar captured");
            SourceOutcome::from_lines(events, CALENDAR_PLACEHOLDER)
        }
        Err(err) => {
            warn!(error = ?err, "calendar capture degraded");
            SourceOutcome::Degraded(CALENDAR_PLACEHOLDER.to_string())
        }
    }
}

async fn scrape_calendar(session: &BrowserSession, config: &CaptureConfig) -> Result<Vec<String>> {
    session.goto(CALENDAR_DAY_URL).await?;
    settle(config.calendar_settle_ms).await;
    shot(session, config, CALENDAR_SCREENSHOT).await;

    // In Calendar day view, actual events are buttons with data-eventid.
    let events = session
        .find_elements(r#"[role="button"][data-eventid]"#)
        .await?;

    let mut cleaned = Vec::new();
    for event in &events {
        let Ok(raw) = event.text().await else {
            continue;
        };
        if let Some(pretty) = clean_event_text(&raw) {
            cleaned.push(pretty);
        }
    }

    Ok(dedup_case_insensitive(cleaned))
}

/// Scrape the top unread rows from the Gmail inbox.
pub async fn capture_inbox(session: &BrowserSession, config: &CaptureConfig) -> SourceOutcome {
    match scrape_inbox(session, config).await {
        Ok(entries) => {
            info!(entries = entries.len(), "inbox captured");
            SourceOutcome::from_lines(entries, INBOX_PLACEHOLDER)
        }
        Err(err) => {
            warn!(error = ?err, "inbox capture degraded");
            SourceOutcome::Degraded(INBOX_PLACEHOLDER.to_string())
        }
    }
}

async fn scrape_inbox(session: &BrowserSession, config: &CaptureConfig) -> Result<Vec<String>> {
    session.goto(INBOX_URL).await?;
    settle(config.inbox_settle_ms).await;
    shot(session, config, INBOX_SCREENSHOT).await;

    // Gmail marks unread rows with class 'zA zE'.
    let rows = session.find_elements("tr.zA.zE").await?;

    let mut entries = Vec::new();
    for row in rows.iter().take(config.max_inbox_rows) {
        let sender = child_text(row, "span.zF, span.yX.xY").await;
        let subject = child_text(row, "span.bog").await;
        if let Some(entry) = format_email_entry(&sender, &subject) {
            entries.push(entry);
        }
    }

    Ok(entries)
}

/// Scrape today's temperature and condition from a Google weather search.
pub async fn capture_weather(session: &BrowserSession, config: &CaptureConfig) -> SourceOutcome {
    match scrape_weather(session, config).await {
        Ok(line) => {
            info!(found = line.is_some(), "weather captured");
            SourceOutcome::from_lines(line.into_iter().collect(), WEATHER_PLACEHOLDER)
        }
        Err(err) => {
            warn!(error = ?err, "weather capture degraded");
            SourceOutcome::Degraded(WEATHER_PLACEHOLDER.to_string())
        }
    }
}

async fn scrape_weather(
    session: &BrowserSession,
    config: &CaptureConfig,
) -> Result<Option<String>> {
    let url = Url::parse_with_params(SEARCH_URL, &[("q", "weather today")])?;
    session.goto(url.as_str()).await?;
    settle(config.weather_settle_ms).await;
    shot(session, config, WEATHER_SCREENSHOT).await;

    let temp = top_level_text(session, "span#wob_tm").await;
    let condition = top_level_text(session, "span#wob_dc").await;

    Ok(format_weather_line(&temp, &condition))
}

/// Join raw event text into a `time – title` line, or `None` for junk
/// calendar entries.
///
/// Day-view event text usually reads like
/// `"9:30am\nAI Standup\nNo location"`; the first line is the time and the
/// second the title. Anything shorter collapses into a single joined line.
pub fn clean_event_text(raw: &str) -> Option<String> {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() >= 2 {
        let title = lines[1];
        if is_junk_calendar_title(title) {
            return None;
        }
        Some(format!("{} – {}", lines[0], title))
    } else {
        let joined = lines.join(" ");
        if joined.is_empty() || is_junk_calendar_title(&joined) {
            return None;
        }
        Some(joined)
    }
}

fn is_junk_calendar_title(title: &str) -> bool {
    let lower = title.to_lowercase();
    JUNK_CALENDAR_TITLES.contains(&lower.as_str())
}

/// Case-insensitive dedup preserving first occurrence; Calendar sometimes
/// repeats an event element.
pub fn dedup_case_insensitive(events: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    events
        .into_iter()
        .filter(|event| seen.insert(event.to_lowercase()))
        .collect()
}

/// Combine a scraped sender and subject, either of which may be empty.
pub fn format_email_entry(sender: &str, subject: &str) -> Option<String> {
    if sender.is_empty() && subject.is_empty() {
        None
    } else {
        Some(format!("{sender}: {subject}"))
    }
}

/// Combine scraped temperature and condition into the weather data line.
pub fn format_weather_line(temp: &str, condition: &str) -> Option<String> {
    if temp.is_empty() && condition.is_empty() {
        None
    } else {
        Some(format!("{temp}°C, {condition}"))
    }
}

async fn settle(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

async fn shot(session: &BrowserSession, config: &CaptureConfig, name: &str) {
    let path = Path::new(&config.screenshots_dir).join(name);
    if let Err(err) = session.screenshot_to(&path).await {
        warn!(error = ?err, screenshot = name, "screenshot failed");
    }
}

async fn child_text(row: &SessionElement, selector: &str) -> String {
    match row.find_element(selector).await {
        Ok(el) => el
            .text()
            .await
            .map(|t| t.trim().to_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

async fn top_level_text(session: &BrowserSession, selector: &str) -> String {
    match session.find_element(selector).await {
        Ok(el) => el
            .text()
            .await
            .map(|t| t.trim().to_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}
