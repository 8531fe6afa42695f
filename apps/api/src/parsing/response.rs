use serde_json::{Map, Value};

use crate::models::profile::{AiResumeRecord, CandidateProfile, DEFAULT_ATS_SCORE};
use crate::parsing::ProviderFailure;
use crate::reconcile::dedup::{dedup_profile, dedup_strings};
use crate::reconcile::heuristics::clean_string;
use crate::reconcile::payload::{parse_object, RawSourcePayload};

const MAX_ATS_SCORE: f64 = 100.0;

/// Parses a provider's raw reply into a generative record.
///
/// The reply must be a JSON object, optionally wrapped in Markdown fences.
/// Profile fields go through the provider field table; missing extras default.
pub fn parse_provider_response(text: &str) -> Result<AiResumeRecord, ProviderFailure> {
    let map = parse_object(text).ok_or_else(|| {
        ProviderFailure::unparsable(format!(
            "response is not a JSON object ({} chars)",
            text.len()
        ))
    })?;

    let extras = Extras::from_map(&map);
    let mut profile: CandidateProfile = RawSourcePayload::Provider(map).to_partial().into();
    dedup_profile(&mut profile);

    Ok(AiResumeRecord {
        profile,
        recommended_job_titles: extras.recommended_job_titles,
        ats_score: extras.ats_score,
        improvement_tips: extras.improvement_tips,
    })
}

struct Extras {
    recommended_job_titles: Vec<String>,
    ats_score: u8,
    improvement_tips: Vec<String>,
}

impl Extras {
    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            recommended_job_titles: strings(map.get("recommendedJobTitles")),
            ats_score: ats_score(map.get("atsScore")),
            improvement_tips: strings(map.get("improvementTips")),
        }
    }
}

fn strings(value: Option<&Value>) -> Vec<String> {
    let items = value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(clean_string);
    dedup_strings(items)
}

/// Numbers and numeric strings are clamped to 0–100; anything else is the default.
fn ats_score(value: Option<&Value>) -> u8 {
    let score = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').parse::<f64>().ok(),
        _ => None,
    };
    match score {
        Some(s) if s.is_finite() => s.clamp(0.0, MAX_ATS_SCORE).round() as u8,
        _ => DEFAULT_ATS_SCORE,
    }
}
