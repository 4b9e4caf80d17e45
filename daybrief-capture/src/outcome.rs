//! Per-source capture results and report text assembly.

/// Result of scraping one source.
///
/// `Extracted` always carries at least one line; capture routines that come
/// back empty-handed return `Degraded` with their placeholder instead, so
/// the assembled report never has a bare section marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Extracted(Vec<String>),
    Degraded(String),
}

impl SourceOutcome {
    /// Wrap extracted lines, degrading to `placeholder` when empty.
    pub fn from_lines(lines: Vec<String>, placeholder: &str) -> Self {
        if lines.is_empty() {
            Self::Degraded(placeholder.to_string())
        } else {
            Self::Extracted(lines)
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }

    /// Data lines for report assembly; a degraded outcome contributes its
    /// placeholder as the single data line.
    pub fn lines(&self) -> &[String] {
        match self {
            Self::Extracted(lines) => lines,
            Self::Degraded(placeholder) => std::slice::from_ref(placeholder),
        }
    }
}

/// One capture cycle's worth of scraped sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureReport {
    pub calendar: SourceOutcome,
    pub inbox: SourceOutcome,
    pub weather: SourceOutcome,
}

impl CaptureReport {
    /// Assemble the section-marker text the summarizer parses: three blocks
    /// separated by blank lines, data lines prefixed `- `.
    pub fn to_report_text(&self) -> String {
        let mut out = String::new();
        push_section(&mut out, "CALENDAR (today)", &self.calendar);
        out.push('\n');
        push_section(&mut out, "INBOX", &self.inbox);
        out.push('\n');
        push_section(&mut out, "WEATHER", &self.weather);
        out
    }

    /// Names of the sources that degraded this cycle.
    pub fn degraded_sources(&self) -> Vec<&'static str> {
        let mut degraded = Vec::new();
        if self.calendar.is_degraded() {
            degraded.push("calendar");
        }
        if self.inbox.is_degraded() {
            degraded.push("inbox");
        }
        if self.weather.is_degraded() {
            degraded.push("weather");
        }
        degraded
    }
}

fn push_section(out: &mut String, marker: &str, outcome: &SourceOutcome) {
    out.push_str(marker);
    out.push('\n');
    for line in outcome.lines() {
        out.push_str("- ");
        out.push_str(line);
        out.push('\n');
    }
}
