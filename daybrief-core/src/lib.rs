//! Summarizer core: turns a scraped capture report into a daily briefing.
//!
//! The input is the loosely structured text emitted by the capture layer
//! (`CALENDAR`/`INBOX`/`WEATHER` sections with `- `-prefixed data lines).
//! Everything in this crate is a pure function over that text:
//!
//! - [`report::parse_report`]: single-pass section scan into [`report::ParsedReport`]
//! - [`urgency::flag_urgent`]: keyword-based priority flagging for emails
//! - [`briefing::render_briefing`] / [`briefing::summarize`]: fixed-template rendering
//!
//! Parsing never fails; missing data degrades to placeholder strings in the
//! rendered briefing rather than surfacing as errors.

pub mod briefing;
pub mod report;
pub mod urgency;

pub use briefing::{render_briefing, summarize};
pub use report::{parse_report, ParsedReport};
pub use urgency::flag_urgent;
