//! Fixed-template rendering of the daily briefing.

use crate::report::{parse_report, ParsedReport};
use crate::urgency::flag_urgent;

/// Shown when the calendar section yielded no data lines.
pub const NO_MEETINGS_PLACEHOLDER: &str = "(No meetings detected today — see calendar_today.png)";
/// Shown when the inbox section yielded no data lines.
pub const NO_EMAILS_PLACEHOLDER: &str = "(No unread emails detected — see inbox_unread.png)";
/// Shown when the weather section yielded no data line.
pub const NO_WEATHER_PLACEHOLDER: &str = "(No weather data — see weather.png)";

/// Render the briefing for an already-parsed report.
///
/// Layout is a fixed template: greeting, MEETINGS TODAY, UNREAD EMAILS,
/// WEATHER, ACTION PLAN, closing note. Empty sections are substituted with
/// their placeholder, so the output always has every section.
pub fn render_briefing(parsed: &ParsedReport) -> String {
    let placeholder_meetings = [NO_MEETINGS_PLACEHOLDER.to_string()];
    let placeholder_emails = [NO_EMAILS_PLACEHOLDER.to_string()];

    let meetings: &[String] = if parsed.meetings.is_empty() {
        &placeholder_meetings
    } else {
        &parsed.meetings
    };
    let emails: &[String] = if parsed.emails.is_empty() {
        &placeholder_emails
    } else {
        &parsed.emails
    };
    let weather = parsed.weather.as_deref().unwrap_or(NO_WEATHER_PLACEHOLDER);

    let urgent = flag_urgent(emails);
    let first_meeting = &meetings[0];

    let mut out: Vec<String> = Vec::new();

    out.push("Here's your day (today):".into());
    out.push(String::new());

    out.push("MEETINGS TODAY:".into());
    for m in meetings {
        out.push(format!("  • {m}"));
    }
    out.push(String::new());

    out.push("UNREAD EMAILS:".into());
    for e in emails {
        out.push(format!("  • {e}"));
    }
    out.push(String::new());

    out.push("WEATHER:".into());
    out.push(format!("  • {weather}"));
    out.push(String::new());

    out.push("ACTION PLAN:".into());
    out.push(format!("  • First meeting: {first_meeting}"));
    if urgent.is_empty() {
        out.push("  • No urgent-looking emails flagged.".into());
    } else {
        out.push("  • Emails to handle first:".into());
        for u in &urgent {
            out.push(format!("    - {u}"));
        }
    }
    out.push("  • Prep, join first meeting on time, then clear priority emails.".into());
    out.push(String::new());

    out.push("Screenshots are below for full context (Calendar, Inbox, Weather).".into());

    out.join("\n")
}

/// Parse the raw capture report and render it in one step.
pub fn summarize(raw: &str) -> String {
    render_briefing(&parse_report(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
CALENDAR (today)
- 9:30am – AI Standup
INBOX
- boss@co.com: Please approve invoice today
WEATHER
- 22°C, Sunny
";

    #[test]
    fn end_to_end_sample_report() {
        let briefing = summarize(SAMPLE);

        assert!(briefing.contains("MEETINGS TODAY:\n  • 9:30am – AI Standup"));
        assert!(briefing.contains(
            "UNREAD EMAILS:\n  • boss@co.com: Please approve invoice today"
        ));
        assert!(briefing.contains("WEATHER:\n  • 22°C, Sunny"));
        // "invoice" and "today" both flag this email for the action plan
        assert!(briefing.contains(
            "  • Emails to handle first:\n    - boss@co.com: Please approve invoice today"
        ));
        assert!(briefing.contains("  • First meeting: 9:30am – AI Standup"));
    }

    #[test]
    fn full_template_layout() {
        let briefing = summarize(SAMPLE);
        let expected = "\
Here's your day (today):

MEETINGS TODAY:
  • 9:30am – AI Standup

UNREAD EMAILS:
  • boss@co.com: Please approve invoice today

WEATHER:
  • 22°C, Sunny

ACTION PLAN:
  • First meeting: 9:30am – AI Standup
  • Emails to handle first:
    - boss@co.com: Please approve invoice today
  • Prep, join first meeting on time, then clear priority emails.

Screenshots are below for full context (Calendar, Inbox, Weather).";
        assert_eq!(briefing, expected);
    }

    #[test]
    fn empty_sections_render_placeholders() {
        let briefing = summarize("CALENDAR\nINBOX\nWEATHER\n");

        assert!(briefing.contains(&format!("MEETINGS TODAY:\n  • {NO_MEETINGS_PLACEHOLDER}")));
        assert!(briefing.contains(&format!("UNREAD EMAILS:\n  • {NO_EMAILS_PLACEHOLDER}")));
        assert!(briefing.contains(&format!("WEATHER:\n  • {NO_WEATHER_PLACEHOLDER}")));
        // the action plan's first-meeting line falls back to the placeholder too
        assert!(briefing.contains(&format!("  • First meeting: {NO_MEETINGS_PLACEHOLDER}")));
    }

    #[test]
    fn report_without_markers_degrades_everywhere() {
        let briefing = summarize("no structure at all\n- stray bullet\n");

        assert!(briefing.contains(NO_MEETINGS_PLACEHOLDER));
        assert!(briefing.contains(NO_EMAILS_PLACEHOLDER));
        assert!(briefing.contains(NO_WEATHER_PLACEHOLDER));
    }

    #[test]
    fn quiet_inbox_gets_the_no_urgent_line() {
        let briefing = summarize("INBOX\n- hr@co.com: Team lunch\n");
        assert!(briefing.contains("  • No urgent-looking emails flagged."));
        assert!(!briefing.contains("Emails to handle first"));
    }

    #[test]
    fn summarize_is_idempotent_per_input() {
        let first = summarize(SAMPLE);
        let second = summarize(SAMPLE);
        assert_eq!(first, second);
    }

    #[test]
    fn placeholder_email_is_never_flagged_urgent() {
        // The inbox placeholder contains none of the urgent keywords, so a
        // fully degraded report still renders the "no urgent" line.
        let briefing = summarize("");
        assert!(briefing.contains("  • No urgent-looking emails flagged."));
    }
}
