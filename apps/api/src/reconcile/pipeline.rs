use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::models::profile::{CandidateProfile, SourceBundle, ValidationResult};
use crate::reconcile::extract::{
    ProviderOutputExtractor, RawTextExtractor, SourceExtractor, SourceKind,
    StructuredOutputExtractor,
};
use crate::reconcile::merge::{merge, SourcePartials};
use crate::reconcile::validation::validate_and_correct;
use crate::reconcile::vocabulary::Vocabulary;
use crate::reconcile::ReconcileError;

/// Progress of a single reconciliation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Extracting,
    Merging,
    Validating,
    Done,
}

/// Which sources contributed at least one field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcesUsed {
    pub structured: bool,
    pub provider: bool,
    pub raw_text: bool,
}

#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub profile: CandidateProfile,
    pub validation: ValidationResult,
    pub sources_used: SourcesUsed,
}

/// Extract → merge → validate/correct over one source bundle.
pub struct Reconciler {
    extractors: Vec<Arc<dyn SourceExtractor>>,
}

impl Reconciler {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self::with_extractors(vec![
            Arc::new(RawTextExtractor::new(vocabulary)),
            Arc::new(ProviderOutputExtractor),
            Arc::new(StructuredOutputExtractor),
        ])
    }

    pub fn with_extractors(extractors: Vec<Arc<dyn SourceExtractor>>) -> Self {
        Self { extractors }
    }

    /// Fails only on blank raw text; every other defect is corrected or reported.
    pub fn reconcile(&self, bundle: &SourceBundle) -> Result<Reconciliation, ReconcileError> {
        let mut stage = Stage::Idle;
        if bundle.raw_text.trim().is_empty() {
            debug!(?stage, "Rejecting bundle with blank raw text");
            return Err(ReconcileError::EmptyInput);
        }

        stage = advance(stage, Stage::Extracting);
        let mut partials = SourcePartials::default();
        let mut sources_used = SourcesUsed::default();
        for extractor in &self.extractors {
            let partial = extractor.extract(bundle);
            let used = !partial.is_empty();
            debug!(source = ?extractor.kind(), used, "Source extracted");
            match extractor.kind() {
                SourceKind::RawText => {
                    sources_used.raw_text = used;
                    partials.raw_text = partial;
                }
                SourceKind::Provider => {
                    sources_used.provider = used;
                    partials.provider = partial;
                }
                SourceKind::Structured => {
                    sources_used.structured = used;
                    partials.structured = partial;
                }
            }
        }

        stage = advance(stage, Stage::Merging);
        let mut profile = merge(&partials);

        stage = advance(stage, Stage::Validating);
        let validation = validate_and_correct(&mut profile, &bundle.raw_text);

        advance(stage, Stage::Done);
        info!(
            confidence = validation.confidence,
            is_valid = validation.is_valid,
            errors = validation.errors.len(),
            warnings = validation.warnings.len(),
            "Reconciliation complete"
        );

        Ok(Reconciliation {
            profile,
            validation,
            sources_used,
        })
    }
}

fn advance(from: Stage, to: Stage) -> Stage {
    debug!(?from, ?to, "Reconciliation stage");
    to
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reconciler() -> Reconciler {
        Reconciler::new(Arc::new(Vocabulary::default()))
    }

    #[test]
    fn test_blank_raw_text_is_empty_input() {
        let bundle = SourceBundle {
            raw_text: "  \n ".into(),
            provider_output: Some(json!({"name": "Jane"})),
            ..Default::default()
        };
        assert!(matches!(
            reconciler().reconcile(&bundle),
            Err(ReconcileError::EmptyInput)
        ));
    }

    #[test]
    fn test_text_only_end_to_end() {
        let bundle = SourceBundle {
            raw_text: "Jane Smith\njane.smith@co.com\n9876543210\nSkills: Python, React".into(),
            ..Default::default()
        };
        let result = reconciler().reconcile(&bundle).unwrap();

        assert_eq!(result.profile.personal_info.full_name, "Jane Smith");
        assert_eq!(result.profile.personal_info.email, "jane.smith@co.com");
        assert_eq!(result.profile.personal_info.phone, "9876543210");
        assert!(result.profile.skills.contains(&"Python".to_string()));
        assert!(result.profile.skills.contains(&"React".to_string()));
        assert!(result.validation.is_valid);
        assert!(result.sources_used.raw_text);
        assert!(!result.sources_used.provider);
    }

    #[test]
    fn test_disagreeing_invalid_emails_end_to_end() {
        let bundle = SourceBundle {
            raw_text: "Jane Smith\nSkills: Python".into(),
            structured_output: Some(json!({"name": "Jane Smith", "email": "jane(at)co"})),
            provider_output: Some(json!({
                "personalInformation": {"fullName": "Jane Smith", "email": "jane@@co"}
            })),
        };
        let result = reconciler().reconcile(&bundle).unwrap();

        assert_eq!(result.profile.personal_info.email, "");
        assert!(!result.validation.is_valid);
        assert!(result
            .validation
            .errors
            .contains(&"Valid email is required".to_string()));
        assert!(result.sources_used.provider);
        assert!(result.sources_used.structured);
    }

    #[test]
    fn test_raw_text_email_beats_provider() {
        let bundle = SourceBundle {
            raw_text: "Jane Smith\njane@real.com".into(),
            provider_output: Some(json!({"email": "jane@hallucinated.com"})),
            ..Default::default()
        };
        let result = reconciler().reconcile(&bundle).unwrap();
        assert_eq!(result.profile.personal_info.email, "jane@real.com");
    }

    #[test]
    fn test_provider_fills_what_text_lacks() {
        let bundle = SourceBundle {
            raw_text: "Jane Smith".into(),
            provider_output: Some(json!(
                "```json\n{\"professionalInformation\": {\"jobTitle\": \"Data Engineer\"}, \"skills\": [\"Spark\"]}\n```"
            )),
            ..Default::default()
        };
        let result = reconciler().reconcile(&bundle).unwrap();
        assert_eq!(result.profile.professional_info.job_title, "Data Engineer");
        assert_eq!(result.profile.skills, vec!["Spark".to_string()]);
    }
}
