//! Deterministic text heuristics over raw resume text.
//!
//! Shared by the raw-text source extractor, the validator's corrections and the
//! fallback extractor. Every function is pure and bounded: no learning, no I/O,
//! fixed caps on how many items a section may yield.

use crate::models::profile::{EducationEntry, ExperienceEntry};
use crate::reconcile::patterns::{
    CERTIFICATION_TRIGGERS, DEGREE_KEYWORD, EMAIL_SEARCH, EXPERIENCE_LINE, GENERIC_PHONE_SEARCH,
    INDIA_CITY, INSTITUTION_KEYWORD, LOCATION_LABEL, NANP_SEARCH, PROJECT_TRIGGERS,
    REGIONAL_MOBILE_SEARCH, SALARY_LABEL, SEGMENT_SPLIT, US_CITY_STATE_ZIP, WHITESPACE_RUN, YEAR,
};

const NAME_SCAN_LINES: usize = 10;
const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 50;
const NAME_FORBIDDEN: &[&str] = &["@", "+", "http", "www"];
const DOCUMENT_HEADINGS: &[&str] = &["resume", "curriculum vitae", "cv"];

pub const MAX_EDUCATION: usize = 5;
pub const MAX_EXPERIENCE: usize = 10;
pub const MAX_PROJECTS: usize = 10;
pub const MAX_CERTIFICATIONS: usize = 10;
const PROJECT_MIN_CHARS: usize = 11;
const CERTIFICATION_MIN_CHARS: usize = 6;

/// Trims and collapses internal whitespace runs to a single space.
pub fn clean_string(value: &str) -> String {
    WHITESPACE_RUN.replace_all(value.trim(), " ").into_owned()
}

/// Like [`clean_string`], also dropping list bullets and stray separators at the edges.
fn clean_fragment(value: &str) -> String {
    let cleaned = clean_string(value);
    cleaned
        .trim_matches(|c: char| c.is_whitespace() || "-–•*|,;:()".contains(c))
        .to_string()
}

/// First of the first ten non-blank lines that looks like a person's name.
pub fn extract_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(NAME_SCAN_LINES)
        .find(|line| {
            let len = line.chars().count();
            let lower = line.to_lowercase();
            (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len)
                && !NAME_FORBIDDEN.iter().any(|f| lower.contains(f))
                && !DOCUMENT_HEADINGS.contains(&lower.as_str())
        })
        .map(clean_string)
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_SEARCH.find(text).map(|m| m.as_str().to_string())
}

/// Regional mobile first, then NANP, then any long digit run.
pub fn extract_phone(text: &str) -> Option<String> {
    [&*REGIONAL_MOBILE_SEARCH, &*NANP_SEARCH, &*GENERIC_PHONE_SEARCH]
        .iter()
        .find_map(|pattern| pattern.find(text))
        .map(|m| m.as_str().trim().to_string())
}

pub fn extract_location(text: &str) -> Option<String> {
    if let Some(caps) = LOCATION_LABEL.captures(text) {
        let value = clean_fragment(&caps[1]);
        if !value.is_empty() {
            return Some(value);
        }
    }
    if let Some(caps) = US_CITY_STATE_ZIP.captures(text) {
        return Some(format!("{}, {}", &caps[1], &caps[2]));
    }
    INDIA_CITY
        .captures(text)
        .map(|caps| format!("{}, India", &caps[1]))
}

pub fn extract_expected_salary(text: &str) -> Option<String> {
    SALARY_LABEL
        .captures(text)
        .map(|caps| clean_fragment(&caps[1]))
        .filter(|s| !s.is_empty())
}

/// Education entries from lines that carry a degree keyword paired with an
/// institution keyword on the same line or the next non-blank line. A next line
/// that reads as an experience entry is never taken as the institution.
pub fn extract_education(text: &str) -> Vec<EducationEntry> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let mut education = Vec::new();

    for (i, &line) in lines.iter().enumerate() {
        if education.len() >= MAX_EDUCATION {
            break;
        }
        if !DEGREE_KEYWORD.is_match(line) {
            continue;
        }

        let segments: Vec<&str> = SEGMENT_SPLIT.split(line).collect();
        let degree = segments
            .iter()
            .find(|s| DEGREE_KEYWORD.is_match(s))
            .copied()
            .unwrap_or(line);

        let same_line = segments
            .iter()
            .find(|s| INSTITUTION_KEYWORD.is_match(s) && !DEGREE_KEYWORD.is_match(s))
            .copied();
        let next_line = lines.get(i + 1).copied().filter(|next| {
            INSTITUTION_KEYWORD.is_match(next)
                && !DEGREE_KEYWORD.is_match(next)
                && !EXPERIENCE_LINE.is_match(next)
        });

        let (institution, year_scope) = match (same_line, next_line) {
            (Some(inst), _) => (inst.to_string(), line.to_string()),
            (None, Some(next)) => {
                let inst = SEGMENT_SPLIT
                    .split(next)
                    .find(|s| INSTITUTION_KEYWORD.is_match(s))
                    .unwrap_or(next);
                (inst.to_string(), format!("{line} {next}"))
            }
            (None, None) => continue,
        };

        let entry = EducationEntry {
            degree: strip_years(degree),
            institution: strip_years(&institution),
            year: YEAR
                .find_iter(&year_scope)
                .last()
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        };
        if !entry.is_blank() {
            education.push(entry);
        }
    }

    education
}

/// Experience entries from `<title> at <company> <year>-<year>` lines.
pub fn extract_experience(text: &str) -> Vec<ExperienceEntry> {
    text.lines()
        .filter_map(|line| EXPERIENCE_LINE.captures(line.trim()))
        .map(|caps| ExperienceEntry {
            role: clean_fragment(&caps[1]),
            company: clean_fragment(&caps[2]),
            duration: format!("{} - {}", &caps[3], &caps[4]),
            achievements: Vec::new(),
        })
        .filter(|e| !e.is_blank())
        .take(MAX_EXPERIENCE)
        .collect()
}

pub fn extract_projects(text: &str) -> Vec<String> {
    capture_lines(text, &PROJECT_TRIGGERS, PROJECT_MIN_CHARS, MAX_PROJECTS)
}

pub fn extract_certifications(text: &str) -> Vec<String> {
    capture_lines(
        text,
        &CERTIFICATION_TRIGGERS,
        CERTIFICATION_MIN_CHARS,
        MAX_CERTIFICATIONS,
    )
}

/// Runs each trigger pattern in turn, keeping group 1 of every match that is long
/// enough, until `cap` distinct items are collected.
fn capture_lines(
    text: &str,
    triggers: &[regex::Regex],
    min_chars: usize,
    cap: usize,
) -> Vec<String> {
    let mut items = Vec::new();
    'patterns: for pattern in triggers {
        for caps in pattern.captures_iter(text) {
            if items.len() >= cap {
                break 'patterns;
            }
            let Some(group) = caps.get(1) else { continue };
            let item = clean_fragment(group.as_str());
            let seen = items
                .iter()
                .any(|existing: &String| existing.to_lowercase() == item.to_lowercase());
            if item.chars().count() >= min_chars && !seen {
                items.push(item);
            }
        }
    }
    items
}

fn strip_years(value: &str) -> String {
    clean_fragment(&YEAR.replace_all(value, ""))
}
