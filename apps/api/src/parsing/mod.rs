//! Generative resume parsing.
//!
//! Raw text is sent to every configured provider concurrently; successful
//! records are combined, and a deterministic extractor stands in when none
//! succeed. The caller always gets a record back for non-blank text.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::llm_client::CompletionProvider;
use crate::models::profile::AiResumeRecord;
use crate::reconcile::vocabulary::Vocabulary;
use crate::reconcile::ReconcileError;

pub mod combiner;
pub mod fallback;
pub mod handlers;
pub mod orchestrator;
pub mod response;
pub mod scoring;

use combiner::ResultCombiner;
use fallback::FallbackExtractor;
use orchestrator::ProviderOrchestrator;

pub const FALLBACK_PROVIDER_ID: &str = "fallback";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureReason {
    Timeout,
    UnparsableResponse,
}

/// Why a single provider call produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason:?}: {detail}")]
pub struct ProviderFailure {
    pub reason: FailureReason,
    pub detail: String,
}

impl ProviderFailure {
    pub fn timeout(detail: impl Into<String>) -> Self {
        Self {
            reason: FailureReason::Timeout,
            detail: detail.into(),
        }
    }

    pub fn unparsable(detail: impl Into<String>) -> Self {
        Self {
            reason: FailureReason::UnparsableResponse,
            detail: detail.into(),
        }
    }
}

/// Output of the generative path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResume {
    pub record: AiResumeRecord,
    pub confidence: u8,
    /// A provider name, `"combined"` or `"fallback"`.
    pub provider_id: String,
    pub processing_time_ms: u64,
}

/// Orchestrate → combine, or fall back when every provider failed.
pub struct ResumeParser {
    orchestrator: ProviderOrchestrator,
    fallback: FallbackExtractor,
}

impl ResumeParser {
    pub fn new(
        providers: Vec<Arc<dyn CompletionProvider>>,
        call_timeout: Duration,
        vocabulary: Arc<Vocabulary>,
    ) -> Self {
        Self {
            orchestrator: ProviderOrchestrator::new(providers, call_timeout),
            fallback: FallbackExtractor::new(vocabulary),
        }
    }

    pub fn has_providers(&self) -> bool {
        self.orchestrator.provider_count() > 0
    }

    pub async fn parse(&self, raw_text: &str) -> Result<ParsedResume, ReconcileError> {
        let started = Instant::now();
        let results = self.orchestrator.run(raw_text).await?;

        let (scored, provider_id) = match ResultCombiner::combine(&results) {
            Some(combined) => (combined.scored, combined.provider_id),
            None => {
                if !results.is_empty() {
                    warn!(
                        providers = results.len(),
                        "{}, using fallback extraction",
                        ReconcileError::AllProvidersFailed
                    );
                }
                (
                    self.fallback.extract(raw_text),
                    FALLBACK_PROVIDER_ID.to_string(),
                )
            }
        };

        let processing_time_ms = started.elapsed().as_millis() as u64;
        info!(
            provider = %provider_id,
            confidence = scored.confidence,
            elapsed_ms = processing_time_ms,
            "Resume parsed"
        );

        Ok(ParsedResume {
            record: scored.record,
            confidence: scored.confidence,
            provider_id,
            processing_time_ms,
        })
    }
}
