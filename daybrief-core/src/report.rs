//! Line scanner for the capture report text.

use serde::{Deserialize, Serialize};

/// Which section the scanner is currently inside. Lines seen before the
/// first marker belong to no section and are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Calendar,
    Inbox,
    Weather,
}

/// Structured view of one capture report.
///
/// Meetings and emails keep their original order. Weather is a single
/// scalar: when the weather section carries several data lines, the last
/// one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReport {
    pub meetings: Vec<String>,
    pub emails: Vec<String>,
    pub weather: Option<String>,
}

const DATA_PREFIX: &str = "- ";

/// Parse a capture report into its three sections.
///
/// Section markers are matched by prefix on the trimmed line, so a data line
/// that happens to start with `CALENDAR`/`INBOX`/`WEATHER` switches sections
/// instead of being collected. Known fragility of the format; callers accept
/// it in exchange for tolerating everything else the scrape throws at us.
/// The parser never fails: unrecognised lines are dropped silently.
pub fn parse_report(raw: &str) -> ParsedReport {
    let mut parsed = ParsedReport::default();
    let mut section = Section::None;

    for line in raw.lines() {
        let stripped = line.trim();

        if stripped.starts_with("CALENDAR") {
            section = Section::Calendar;
            continue;
        }
        if stripped.starts_with("INBOX") {
            section = Section::Inbox;
            continue;
        }
        if stripped.starts_with("WEATHER") {
            section = Section::Weather;
            continue;
        }

        let Some(content) = stripped.strip_prefix(DATA_PREFIX) else {
            continue;
        };

        match section {
            Section::Calendar => parsed.meetings.push(content.to_string()),
            Section::Inbox => parsed.emails.push(content.to_string()),
            Section::Weather => parsed.weather = Some(content.to_string()),
            Section::None => {}
        }
    }

    parsed
}
