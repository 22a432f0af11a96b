//! Fixed vocabularies and compiled-once regex tables.
//!
//! Every pattern here is immutable configuration shared read-only across
//! requests. Regexes are compiled on first use and cached for the process
//! lifetime; the accessor functions never recompile.

use std::sync::OnceLock;

use regex::Regex;

/// Phrases whose presence marks a sentence as potentially actionable.
/// Matched case-insensitively as substrings, not tokens.
pub const ACTION_VERBS: &[&str] = &[
    "will",
    "should",
    "must",
    "need to",
    "needs to",
    "have to",
    "has to",
    "going to",
    "plan to",
    "plans to",
    "responsible for",
    "assigned to",
    "take care of",
    "handle",
    "complete",
    "finish",
    "deliver",
    "prepare",
    "create",
    "build",
    "develop",
    "design",
    "implement",
    "review",
    "send",
];

/// Keywords that force high priority. Checked before the low list.
pub const HIGH_PRIORITY_KEYWORDS: &[&str] =
    &["urgent", "asap", "immediately", "critical", "high priority"];

/// Keywords that force low priority. Anything unmatched defaults to medium.
pub const LOW_PRIORITY_KEYWORDS: &[&str] =
    &["when possible", "eventually", "low priority", "nice to have"];

/// Role nouns used as assignee fallback when no person entity is present.
/// Matched as `"the <role>"` substrings.
pub const ASSIGNEE_ROLES: &[&str] = &["team", "designer", "developer", "manager", "lead", "engineer"];

/// Weekday names — highest-priority deadline pattern
pub fn weekday_regex() -> &'static Regex {
    static WEEKDAY_RE: OnceLock<Regex> = OnceLock::new();
    WEEKDAY_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b")
            .expect("weekday regex must compile")
    })
}

/// Relative-day terms
pub fn relative_day_regex() -> &'static Regex {
    static RELATIVE_RE: OnceLock<Regex> = OnceLock::new();
    RELATIVE_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(tomorrow|today|next week|this week)\b")
            .expect("relative day regex must compile")
    })
}

/// Month name followed by a day-of-month
pub fn month_day_regex() -> &'static Regex {
    static MONTH_DAY_RE: OnceLock<Regex> = OnceLock::new();
    MONTH_DAY_RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2}\b",
        )
        .expect("month day regex must compile")
    })
}

/// Numeric D/M/Y date
pub fn numeric_date_regex() -> &'static Regex {
    static NUMERIC_DATE_RE: OnceLock<Regex> = OnceLock::new();
    NUMERIC_DATE_RE
        .get_or_init(|| Regex::new(r"\b\d{1,2}/\d{1,2}/\d{2,4}\b").expect("numeric date regex must compile"))
}

/// Deadline patterns in priority order. The first match wins.
pub fn deadline_patterns() -> [&'static Regex; 4] {
    [
        weekday_regex(),
        relative_day_regex(),
        month_day_regex(),
        numeric_date_regex(),
    ]
}

/// Leading discourse filler ("so," / "well" / "um" ...)
pub fn filler_prefix_regex() -> &'static Regex {
    static FILLER_RE: OnceLock<Regex> = OnceLock::new();
    FILLER_RE.get_or_init(|| {
        Regex::new(r"^(?i:so|well|um|uh|okay|alright)\b,?\s*")
            .expect("filler prefix regex must compile")
    })
}

/// Leading polite request ("can you" / "could you" ...)
pub fn polite_prefix_regex() -> &'static Regex {
    static POLITE_RE: OnceLock<Regex> = OnceLock::new();
    POLITE_RE.get_or_init(|| {
        Regex::new(r"^(?i:can you|could you|would you|will you)\s+")
            .expect("polite prefix regex must compile")
    })
}

/// Leading vocative ("Name, ") — case-sensitive on purpose, only a
/// capitalized word followed by a comma is treated as an address.
pub fn vocative_prefix_regex() -> &'static Regex {
    static VOCATIVE_RE: OnceLock<Regex> = OnceLock::new();
    VOCATIVE_RE
        .get_or_init(|| Regex::new(r"^[A-Z][a-z]+,\s*").expect("vocative prefix regex must compile"))
}
