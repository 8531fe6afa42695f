//! Compiled regular expressions shared by the text heuristics and the validator.
//!
//! `*_SHAPE` patterns are anchored and validate a whole value; `*_SEARCH` and the
//! capture patterns scan free text.

use once_cell::sync::Lazy;
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid built-in regex")
}

// ── Format validation ───────────────────────────────────────────────────────

pub static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| compile(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"));

/// Generic international number: optional `+`, no leading zero, up to 16 digits.
pub static GENERIC_PHONE_SHAPE: Lazy<Regex> = Lazy::new(|| compile(r"^\+?[1-9]\d{0,15}$"));

/// Indian mobile number with optional `+91` prefix.
pub static REGIONAL_MOBILE_SHAPE: Lazy<Regex> =
    Lazy::new(|| compile(r"^(?:\+91[\s-]?)?[6-9]\d{9}$"));

/// North American numbering plan, e.g. `(555) 123-4567` or `+1 555.123.4567`.
pub static NANP_SHAPE: Lazy<Regex> =
    Lazy::new(|| compile(r"^(?:\+1[\s-]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}$"));

// ── Free-text search ────────────────────────────────────────────────────────

pub static EMAIL_SEARCH: Lazy<Regex> =
    Lazy::new(|| compile(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}"));

pub static REGIONAL_MOBILE_SEARCH: Lazy<Regex> =
    Lazy::new(|| compile(r"(?:\+91[ \t-]?)?\b[6-9]\d{9}\b"));

pub static NANP_SEARCH: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?:\+1[ \t-]?)?\(?\b\d{3}\)?[-. \t]?\d{3}[-. \t]?\d{4}\b")
});

/// Bare digit run of 7–15 digits; shorter runs are years, zip codes and the like.
pub static GENERIC_PHONE_SEARCH: Lazy<Regex> = Lazy::new(|| compile(r"\+?\b[1-9]\d{6,14}\b"));

pub static LOCATION_LABEL: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?im)^[ \t]*(?:address|location|city)[ \t]*[:\-][ \t]*([^\n]+)$")
});

pub static US_CITY_STATE_ZIP: Lazy<Regex> = Lazy::new(|| {
    compile(r"\b([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*),[ \t]*([A-Z]{2})[ \t]*\d{5}\b")
});

pub static INDIA_CITY: Lazy<Regex> =
    Lazy::new(|| compile(r"\b([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*),[ \t]*(?i:india)\b"));

pub static SALARY_LABEL: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?im)^[ \t]*(?:expected[ \t]+salary|expected[ \t]+ctc|salary|ctc)[ \t]*[:\-][ \t]*([^\n]+)$",
    )
});

pub static YEAR: Lazy<Regex> = Lazy::new(|| compile(r"\b(?:19|20)\d{2}\b"));

// ── Section heuristics ──────────────────────────────────────────────────────

/// `<title> at|@|-|| <company> <year> - <year|present>` on a single line.
pub static EXPERIENCE_LINE: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?i)^(.+?)[ \t]+(?:at|@|-|–|\|)[ \t]+(.+?)[ \t]*[,(]?[ \t]*\b((?:19|20)\d{2})[ \t]*(?:-|–|to)[ \t]*((?:19|20)\d{2}|present|current|now)\b",
    )
});

/// Degree names and abbreviations. Bare two-letter forms (`MS`, `BA`, ...) only
/// count when followed by `.`, `in` or `of`, or when they open the text and end
/// a segment, so `MS Excel` is not a degree.
pub static DEGREE_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    compile(concat!(
        r"\b(?:(?i:bachelor(?:'s)?|master(?:'s)?|doctorate|diploma)|Ph\.?D|[BM]\.?Tech|MBA|[BM]\.?Sc|[BM]\.[SAE])(?:\.|\b)",
        r"|\b[BM][SAE](?:\.|[ \t]+(?:in|of)\b)",
        r"|^[BM][SAE][ \t]*(?:,|\||$)",
    ))
});

pub static INSTITUTION_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)\b(?:university|college|institute|school|academy|polytechnic)\b")
});

/// Separators between the degree and institution parts of an education line.
pub static SEGMENT_SPLIT: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)[ \t]*(?:,|\||[ \t][-–][ \t]|[ \t]at[ \t]|[ \t]from[ \t])[ \t]*"));

pub static PROJECT_TRIGGERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        compile(r"(?i)\bprojects?[ \t]*[:\-][ \t]*([^\n]+)"),
        compile(r"(?i)\b(?:built|developed|created)[ \t]+([^\n]+)"),
    ]
});

pub static CERTIFICATION_TRIGGERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        compile(r"(?i)\bcertifications?[ \t]*[:\-][ \t]*([^\n]+)"),
        compile(r"(?i)\bcertified[ \t]+in[ \t]+([^\n]+)"),
        compile(r"\b([A-Z]{2,}[ \t]+[Cc]ertification)\b"),
        compile(r"(?im)^[ \t]*([^\n]+?)[ \t]+certificate\b"),
    ]
});

pub static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| compile(r"\s+"));
