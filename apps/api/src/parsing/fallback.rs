use std::sync::Arc;

use crate::models::profile::{AiResumeRecord, CandidateProfile, PersonalInfo, ProfessionalInfo};
use crate::parsing::orchestrator::ScoredRecord;
use crate::parsing::scoring::profile_confidence;
use crate::reconcile::dedup::dedup_strings;
use crate::reconcile::heuristics::{extract_email, extract_name, extract_phone};
use crate::reconcile::vocabulary::Vocabulary;

/// Ceiling on fallback confidence, also used as its ATS score.
pub const FALLBACK_CONFIDENCE_CAP: u8 = 30;

const GENERIC_TITLES: &[&str] = &["Software Engineer", "Developer"];

const FALLBACK_TIPS: &[&str] = &[
    "AI parsing was unavailable. Please review and update your information manually.",
    "Add more specific technical skills",
    "Include quantifiable achievements",
    "Optimize keywords for ATS systems",
];

/// Deterministic last-resort extraction when no provider produced a record.
///
/// Fields the heuristics cannot find stay empty; nothing is fabricated.
pub struct FallbackExtractor {
    vocabulary: Arc<Vocabulary>,
}

impl FallbackExtractor {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn extract(&self, raw_text: &str) -> ScoredRecord {
        let job_title = self
            .vocabulary
            .first_title_in(raw_text)
            .unwrap_or(self.vocabulary.default_job_title.as_str())
            .to_string();

        let profile = CandidateProfile {
            personal_info: PersonalInfo {
                full_name: extract_name(raw_text).unwrap_or_default(),
                email: extract_email(raw_text).unwrap_or_default(),
                phone: extract_phone(raw_text).unwrap_or_default(),
                location: String::new(),
            },
            professional_info: ProfessionalInfo {
                job_title: job_title.clone(),
                expected_salary: String::new(),
            },
            skills: dedup_strings(self.vocabulary.skills_in(raw_text)),
            ..Default::default()
        };

        let recommended_job_titles = dedup_strings(
            std::iter::once(job_title).chain(GENERIC_TITLES.iter().map(|t| t.to_string())),
        );
        let confidence = profile_confidence(&profile).min(FALLBACK_CONFIDENCE_CAP);

        ScoredRecord {
            record: AiResumeRecord {
                profile,
                recommended_job_titles,
                ats_score: FALLBACK_CONFIDENCE_CAP,
                improvement_tips: FALLBACK_TIPS.iter().map(|t| t.to_string()).collect(),
            },
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> FallbackExtractor {
        FallbackExtractor::new(Arc::new(Vocabulary::default()))
    }

    #[test]
    fn test_rich_text_is_capped() {
        let text = "Jane Smith\njane@co.com\n+91 9876543210\nSenior Developer\nPython, Docker";
        let scored = extractor().extract(text);
        let profile = &scored.record.profile;

        assert_eq!(profile.personal_info.full_name, "Jane Smith");
        assert_eq!(profile.personal_info.email, "jane@co.com");
        assert_eq!(profile.personal_info.phone, "+91 9876543210");
        assert_eq!(profile.professional_info.job_title, "Developer");
        assert_eq!(profile.skills, vec!["Python".to_string(), "Docker".to_string()]);
        assert_eq!(scored.confidence, FALLBACK_CONFIDENCE_CAP);
        assert_eq!(scored.record.ats_score, 30);
        assert_eq!(
            scored.record.recommended_job_titles,
            vec!["Developer".to_string(), "Software Engineer".to_string()]
        );
    }

    #[test]
    fn test_never_fails_and_never_exceeds_cap() {
        for text in ["x", "@@@", "Chef\nCooking", "lorem ipsum ".repeat(500).as_str()] {
            let scored = extractor().extract(text);
            assert!(scored.confidence <= FALLBACK_CONFIDENCE_CAP);
            assert_eq!(scored.record.improvement_tips.len(), 4);
        }
    }

    #[test]
    fn test_default_title_and_no_placeholders() {
        let scored = extractor().extract("Chef\nCooking");
        let profile = &scored.record.profile;
        assert_eq!(profile.professional_info.job_title, "Software Developer");
        assert!(profile.personal_info.location.is_empty());
        assert!(profile.education.is_empty());
        assert!(profile.experience.is_empty());
        assert!(scored.record.improvement_tips[0].contains("review"));
    }
}
