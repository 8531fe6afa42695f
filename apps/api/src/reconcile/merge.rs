//! Fixed-priority merge of the per-source partial profiles.

use crate::models::profile::{CandidateProfile, PartialProfile, PersonalInfo, ProfessionalInfo};
use crate::reconcile::dedup::{dedup_education, dedup_experience, dedup_strings};

/// Per-source partials, one slot per source kind.
#[derive(Debug, Clone, Default)]
pub struct SourcePartials {
    pub raw_text: PartialProfile,
    pub provider: PartialProfile,
    pub structured: PartialProfile,
}

impl SourcePartials {
    /// Highest priority first: ground-truth text, then provider, then structured output.
    fn by_priority(&self) -> [&PartialProfile; 3] {
        [&self.raw_text, &self.provider, &self.structured]
    }
}

/// Scalars take the first non-empty value in priority order. Collections are the
/// union of every source in priority order, deduplicated case-insensitively.
pub fn merge(partials: &SourcePartials) -> CandidateProfile {
    let sources = partials.by_priority();

    CandidateProfile {
        personal_info: PersonalInfo {
            full_name: first_non_empty(sources.iter().map(|p| &p.full_name)),
            email: first_non_empty(sources.iter().map(|p| &p.email)),
            phone: first_non_empty(sources.iter().map(|p| &p.phone)),
            location: first_non_empty(sources.iter().map(|p| &p.location)),
        },
        professional_info: ProfessionalInfo {
            job_title: first_non_empty(sources.iter().map(|p| &p.job_title)),
            expected_salary: first_non_empty(sources.iter().map(|p| &p.expected_salary)),
        },
        skills: dedup_strings(sources.iter().flat_map(|p| p.skills.iter().cloned())),
        projects: dedup_strings(sources.iter().flat_map(|p| p.projects.iter().cloned())),
        certifications: dedup_strings(
            sources
                .iter()
                .flat_map(|p| p.certifications.iter().cloned()),
        ),
        education: dedup_education(sources.iter().flat_map(|p| p.education.iter().cloned())),
        experience: dedup_experience(sources.iter().flat_map(|p| p.experience.iter().cloned())),
    }
}

fn first_non_empty<'a>(values: impl Iterator<Item = &'a Option<String>>) -> String {
    values
        .filter_map(|v| v.as_deref())
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or_default()
        .to_string()
}
