//! Source extractors, one per upstream source, all behind the same trait.
//!
//! Extraction is pure and infallible: malformed or missing input yields an empty
//! `PartialProfile`, never an error.

use std::sync::Arc;

use tracing::warn;

use crate::models::profile::{PartialProfile, SourceBundle};
use crate::reconcile::dedup::dedup_strings;
use crate::reconcile::heuristics;
use crate::reconcile::payload::RawSourcePayload;
use crate::reconcile::vocabulary::Vocabulary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Structured,
    Provider,
    RawText,
}

/// One upstream source of candidate data. Each implementation reads its own
/// field of the bundle and ignores the rest.
pub trait SourceExtractor: Send + Sync {
    fn kind(&self) -> SourceKind;

    fn extract(&self, bundle: &SourceBundle) -> PartialProfile;
}

pub struct StructuredOutputExtractor;

impl SourceExtractor for StructuredOutputExtractor {
    fn kind(&self) -> SourceKind {
        SourceKind::Structured
    }

    fn extract(&self, bundle: &SourceBundle) -> PartialProfile {
        let payload = RawSourcePayload::structured(bundle.structured_output.as_ref());
        if payload.is_absent() && bundle.structured_output.is_some() {
            warn!("Structured output is not a JSON object; ignoring it");
        }
        payload.to_partial()
    }
}

pub struct ProviderOutputExtractor;

impl SourceExtractor for ProviderOutputExtractor {
    fn kind(&self) -> SourceKind {
        SourceKind::Provider
    }

    fn extract(&self, bundle: &SourceBundle) -> PartialProfile {
        let payload = RawSourcePayload::provider(bundle.provider_output.as_ref());
        if payload.is_absent() && bundle.provider_output.is_some() {
            warn!("Provider output is neither a JSON object nor JSON text; ignoring it");
        }
        payload.to_partial()
    }
}

/// Heuristic extraction over the raw resume text.
///
/// Unlike the fallback extractor, a job title is only reported when a vocabulary
/// title actually occurs in the text.
pub struct RawTextExtractor {
    vocabulary: Arc<Vocabulary>,
}

impl RawTextExtractor {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }
}

impl SourceExtractor for RawTextExtractor {
    fn kind(&self) -> SourceKind {
        SourceKind::RawText
    }

    fn extract(&self, bundle: &SourceBundle) -> PartialProfile {
        let text = bundle.raw_text.as_str();
        if text.trim().is_empty() {
            return PartialProfile::default();
        }

        PartialProfile {
            full_name: heuristics::extract_name(text),
            email: heuristics::extract_email(text),
            phone: heuristics::extract_phone(text),
            location: heuristics::extract_location(text),
            job_title: self.vocabulary.first_title_in(text).map(str::to_string),
            expected_salary: heuristics::extract_expected_salary(text),
            skills: dedup_strings(self.vocabulary.skills_in(text)),
            education: heuristics::extract_education(text),
            experience: heuristics::extract_experience(text),
            projects: heuristics::extract_projects(text),
            certifications: heuristics::extract_certifications(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bundle(raw_text: &str) -> SourceBundle {
        SourceBundle {
            raw_text: raw_text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_payloads_extract_empty() {
        let b = bundle("Jane Smith");
        assert!(StructuredOutputExtractor.extract(&b).is_empty());
        assert!(ProviderOutputExtractor.extract(&b).is_empty());
    }

    #[test]
    fn test_garbage_payloads_extract_empty() {
        let b = SourceBundle {
            raw_text: String::new(),
            structured_output: Some(json!("just a string")),
            provider_output: Some(json!("{broken json")),
        };
        assert!(StructuredOutputExtractor.extract(&b).is_empty());
        assert!(ProviderOutputExtractor.extract(&b).is_empty());
        assert!(RawTextExtractor::new(Arc::new(Vocabulary::default()))
            .extract(&b)
            .is_empty());
    }

    #[test]
    fn test_raw_text_job_title_only_from_vocabulary() {
        let extractor = RawTextExtractor::new(Arc::new(Vocabulary::default()));
        let none = extractor.extract(&bundle("Jane Smith\nChef at Bistro"));
        assert_eq!(none.job_title, None);

        let found = extractor.extract(&bundle("Jane Smith\nBackend Developer"));
        assert_eq!(found.job_title.as_deref(), Some("Developer"));
    }

    #[test]
    fn test_raw_text_uses_injected_vocabulary() {
        let vocab = Vocabulary::new(vec!["Rust".into()], vec![], "Engineer".into());
        let extractor = RawTextExtractor::new(Arc::new(vocab));
        let partial = extractor.extract(&bundle("Jane Smith\nSkills: Rust, Python"));
        assert_eq!(partial.skills, vec!["Rust".to_string()]);
    }

    #[test]
    fn test_raw_text_scalars() {
        let extractor = RawTextExtractor::new(Arc::new(Vocabulary::default()));
        let partial = extractor.extract(&bundle(
            "Jane Smith\njane.smith@co.com\n9876543210\nSkills: Python, React",
        ));
        assert_eq!(partial.full_name.as_deref(), Some("Jane Smith"));
        assert_eq!(partial.email.as_deref(), Some("jane.smith@co.com"));
        assert_eq!(partial.phone.as_deref(), Some("9876543210"));
        assert_eq!(
            partial.skills,
            vec!["Python".to_string(), "React".to_string()]
        );
    }
}
