//! Validator & corrector for a merged candidate profile.
//!
//! Invalid scalars are re-derived from the raw resume text only. Provider and
//! structured values are never consulted here: by the time a value fails
//! validation the merger has already preferred them where the text was silent.

use std::fmt;

use thiserror::Error;

use crate::models::profile::{CandidateProfile, ValidationResult};
use crate::reconcile::dedup::dedup_profile;
use crate::reconcile::heuristics::{extract_email, extract_name, extract_phone};
use crate::reconcile::patterns::{
    EMAIL_SHAPE, GENERIC_PHONE_SHAPE, NANP_SHAPE, REGIONAL_MOBILE_SHAPE,
};

const NAME_MIN_CHARS: usize = 2;
const FULL_CONFIDENCE: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A problem found in the final profile, with its fixed confidence penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("Name is missing or too short")]
    MissingName,
    #[error("Valid email is required")]
    InvalidEmail,
    #[error("Phone number format may be invalid")]
    InvalidPhone,
    #[error("No skills found")]
    NoSkills,
    #[error("No work experience found")]
    NoExperience,
    #[error("No education information found")]
    NoEducation,
}

impl ValidationIssue {
    pub fn severity(self) -> Severity {
        match self {
            Self::MissingName | Self::InvalidEmail => Severity::Error,
            _ => Severity::Warning,
        }
    }

    pub fn penalty(self) -> i32 {
        match self {
            Self::MissingName | Self::InvalidEmail => 20,
            Self::NoSkills | Self::NoExperience => 15,
            Self::InvalidPhone | Self::NoEducation => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectedField {
    FullName,
    Email,
    Phone,
}

impl fmt::Display for CorrectedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FullName => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        })
    }
}

/// A scalar replaced from the raw text. Reported as a penalty-free warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub field: CorrectedField,
    pub from: String,
    pub to: String,
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.to.is_empty() {
            write!(
                f,
                "Cleared {} \"{}\": no valid value found in resume text",
                self.field, self.from
            )
        } else if self.from.is_empty() {
            write!(f, "Filled {} from resume text: \"{}\"", self.field, self.to)
        } else {
            write!(
                f,
                "Corrected {} from \"{}\" to \"{}\" using resume text",
                self.field, self.from, self.to
            )
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email.trim())
}

/// Accepts a generic international number, an Indian mobile or a NANP number.
/// The generic shape is checked with common separators removed.
pub fn is_valid_phone(phone: &str) -> bool {
    let phone = phone.trim();
    let compact: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect();
    GENERIC_PHONE_SHAPE.is_match(&compact)
        || REGIONAL_MOBILE_SHAPE.is_match(phone)
        || NANP_SHAPE.is_match(phone)
}

fn is_valid_name(name: &str) -> bool {
    name.trim().chars().count() >= NAME_MIN_CHARS
}

/// Re-derives invalid scalars from `raw_text` and re-applies every dedup invariant.
/// Returns the corrections that changed a value.
pub fn correct(profile: &mut CandidateProfile, raw_text: &str) -> Vec<Correction> {
    let mut corrections = Vec::new();
    let info = &mut profile.personal_info;

    if !info.email.is_empty() && !is_valid_email(&info.email) {
        let replacement = extract_email(raw_text).unwrap_or_default();
        corrections.push(replace(CorrectedField::Email, &mut info.email, replacement));
    }

    if !info.phone.is_empty() && !is_valid_phone(&info.phone) {
        let replacement = extract_phone(raw_text)
            .filter(|p| is_valid_phone(p))
            .unwrap_or_default();
        corrections.push(replace(CorrectedField::Phone, &mut info.phone, replacement));
    }

    if !is_valid_name(&info.full_name) {
        let replacement = extract_name(raw_text).unwrap_or_default();
        if replacement != info.full_name {
            corrections.push(replace(
                CorrectedField::FullName,
                &mut info.full_name,
                replacement,
            ));
        }
    }

    dedup_profile(profile);
    corrections
}

fn replace(field: CorrectedField, slot: &mut String, value: String) -> Correction {
    let from = std::mem::replace(slot, value);
    Correction {
        field,
        from,
        to: slot.clone(),
    }
}

/// Every issue present in `profile`, in reporting order.
pub fn find_issues(profile: &CandidateProfile) -> Vec<ValidationIssue> {
    let info = &profile.personal_info;
    let checks = [
        (!is_valid_name(&info.full_name), ValidationIssue::MissingName),
        (!is_valid_email(&info.email), ValidationIssue::InvalidEmail),
        (!is_valid_phone(&info.phone), ValidationIssue::InvalidPhone),
        (profile.skills.is_empty(), ValidationIssue::NoSkills),
        (profile.experience.is_empty(), ValidationIssue::NoExperience),
        (profile.education.is_empty(), ValidationIssue::NoEducation),
    ];
    checks
        .into_iter()
        .filter_map(|(failed, issue)| failed.then_some(issue))
        .collect()
}

/// Scores `profile` from 100 down by each issue's penalty, floored at 0.
pub fn score(profile: &CandidateProfile, corrections: &[Correction]) -> ValidationResult {
    let issues = find_issues(profile);
    let confidence = issues
        .iter()
        .fold(FULL_CONFIDENCE, |acc, issue| acc - issue.penalty())
        .max(0);

    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .map(ToString::to_string)
        .collect();
    let warnings = issues
        .iter()
        .filter(|i| i.severity() == Severity::Warning)
        .map(ToString::to_string)
        .chain(corrections.iter().map(ToString::to_string))
        .collect();

    ValidationResult {
        is_valid: errors.is_empty(),
        confidence: confidence as u8,
        errors,
        warnings,
    }
}

/// Corrects `profile` in place from the raw text, then scores the corrected result.
pub fn validate_and_correct(profile: &mut CandidateProfile, raw_text: &str) -> ValidationResult {
    let corrections = correct(profile, raw_text);
    score(profile, &corrections)
}
