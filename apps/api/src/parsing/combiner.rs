use tracing::debug;

use crate::parsing::orchestrator::{ProviderResult, ScoredRecord};
use crate::parsing::scoring::profile_confidence;
use crate::reconcile::dedup::dedup_strings;

/// Provenance reported when several provider records were merged.
pub const COMBINED_PROVIDER_ID: &str = "combined";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedRecord {
    pub scored: ScoredRecord,
    pub provider_id: String,
}

/// Merges the successful provider records of one request.
pub struct ResultCombiner;

impl ResultCombiner {
    /// `None` when no provider succeeded.
    ///
    /// The highest-confidence record supplies every scalar (ties go to the earliest
    /// provider). Skills, recommended titles and tips are unioned across all
    /// successes; the ATS score is the maximum; confidence is recomputed.
    pub fn combine(results: &[ProviderResult]) -> Option<CombinedRecord> {
        let successes: Vec<(&str, &ScoredRecord)> = results
            .iter()
            .filter_map(|r| r.outcome.as_ref().ok().map(|s| (r.provider_id.as_str(), s)))
            .collect();

        match successes.as_slice() {
            [] => None,
            [(id, scored)] => Some(CombinedRecord {
                scored: (*scored).clone(),
                provider_id: id.to_string(),
            }),
            many => Some(Self::merge_many(many)),
        }
    }

    fn merge_many(successes: &[(&str, &ScoredRecord)]) -> CombinedRecord {
        let (base_id, base) = successes
            .iter()
            .fold(successes[0], |best, current| {
                if current.1.confidence > best.1.confidence {
                    *current
                } else {
                    best
                }
            });
        debug!(base = base_id, providers = successes.len(), "Combining provider records");

        let records = || successes.iter().map(|(_, s)| &s.record);
        let mut record = base.record.clone();
        record.profile.skills =
            dedup_strings(records().flat_map(|r| r.profile.skills.iter().cloned()));
        record.recommended_job_titles =
            dedup_strings(records().flat_map(|r| r.recommended_job_titles.iter().cloned()));
        record.improvement_tips =
            dedup_strings(records().flat_map(|r| r.improvement_tips.iter().cloned()));
        record.ats_score = records().map(|r| r.ats_score).max().unwrap_or(base.record.ats_score);

        let confidence = profile_confidence(&record.profile);
        CombinedRecord {
            scored: ScoredRecord { record, confidence },
            provider_id: COMBINED_PROVIDER_ID.to_string(),
        }
    }
}
