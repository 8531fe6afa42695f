use std::collections::HashSet;

use crate::models::profile::{CandidateProfile, EducationEntry, ExperienceEntry};

/// Removes case-insensitive duplicates, keeping the first-seen casing and order.
/// Blank strings are dropped.
pub fn dedup_strings<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty() && seen.insert(item.to_lowercase()))
        .collect()
}

/// Keeps the first entry per case-insensitive `(degree, institution)` key.
pub fn dedup_education<I>(entries: I) -> Vec<EducationEntry>
where
    I: IntoIterator<Item = EducationEntry>,
{
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|e| !e.is_blank() && seen.insert(e.dedup_key()))
        .collect()
}

/// Keeps the first entry per case-insensitive `(role, company)` key.
pub fn dedup_experience<I>(entries: I) -> Vec<ExperienceEntry>
where
    I: IntoIterator<Item = ExperienceEntry>,
{
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|e| !e.is_blank() && seen.insert(e.dedup_key()))
        .collect()
}

/// Re-applies every collection invariant of a candidate profile in place.
pub fn dedup_profile(profile: &mut CandidateProfile) {
    profile.skills = dedup_strings(std::mem::take(&mut profile.skills));
    profile.projects = dedup_strings(std::mem::take(&mut profile.projects));
    profile.certifications = dedup_strings(std::mem::take(&mut profile.certifications));
    profile.education = dedup_education(std::mem::take(&mut profile.education));
    profile.experience = dedup_experience(std::mem::take(&mut profile.experience));
}
