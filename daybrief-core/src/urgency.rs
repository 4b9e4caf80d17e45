//! Naive priority flagging for scraped emails.

/// Substrings that flag an email as worth handling first. Matched
/// case-insensitively anywhere in the `sender: subject` text.
pub const URGENT_KEYWORDS: [&str; 7] = [
    "urgent", "asap", "today", "approval", "invoice", "security", "deadline",
];

/// Return the emails containing at least one urgent keyword, preserving
/// input order. No dedup, no ranking.
pub fn flag_urgent(emails: &[String]) -> Vec<&str> {
    emails
        .iter()
        .filter(|entry| {
            let lower = entry.to_lowercase();
            URGENT_KEYWORDS.iter().any(|kw| lower.contains(kw))
        })
        .map(String::as_str)
        .collect()
}
