use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::{timeout, Instant};
use tracing::{debug, info, warn};

use crate::llm_client::prompts::{resume_parse_prompt, JSON_ONLY_SYSTEM};
use crate::llm_client::CompletionProvider;
use crate::models::profile::AiResumeRecord;
use crate::parsing::response::parse_provider_response;
use crate::parsing::scoring::profile_confidence;
use crate::parsing::ProviderFailure;
use crate::reconcile::ReconcileError;

/// A successfully parsed provider record with its completeness confidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredRecord {
    pub record: AiResumeRecord,
    pub confidence: u8,
}

impl ScoredRecord {
    pub fn new(record: AiResumeRecord) -> Self {
        let confidence = profile_confidence(&record.profile);
        Self { record, confidence }
    }
}

/// Outcome of one provider call. Ephemeral: consumed by the combiner.
#[derive(Debug, Clone)]
pub struct ProviderResult {
    pub provider_id: String,
    pub processing_time_ms: u64,
    pub outcome: Result<ScoredRecord, ProviderFailure>,
}

impl ProviderResult {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Fans one resume out to every configured provider and waits for all of them.
///
/// A failing, slow or garbled provider only fails its own `ProviderResult`.
pub struct ProviderOrchestrator {
    providers: Vec<Arc<dyn CompletionProvider>>,
    call_timeout: Duration,
}

impl ProviderOrchestrator {
    pub fn new(providers: Vec<Arc<dyn CompletionProvider>>, call_timeout: Duration) -> Self {
        Self {
            providers,
            call_timeout,
        }
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Results are returned in provider order.
    pub async fn run(&self, raw_text: &str) -> Result<Vec<ProviderResult>, ReconcileError> {
        if raw_text.trim().is_empty() {
            return Err(ReconcileError::EmptyInput);
        }
        if self.providers.is_empty() {
            debug!("No providers configured");
            return Ok(Vec::new());
        }

        let prompt = resume_parse_prompt(raw_text);
        let calls = self
            .providers
            .iter()
            .map(|provider| self.call_provider(provider.as_ref(), &prompt));
        let results = join_all(calls).await;

        info!(
            providers = results.len(),
            succeeded = results.iter().filter(|r| r.succeeded()).count(),
            "Provider calls settled"
        );
        Ok(results)
    }

    async fn call_provider(&self, provider: &dyn CompletionProvider, prompt: &str) -> ProviderResult {
        let provider_id = provider.id().to_string();
        let started = Instant::now();

        let outcome = match timeout(self.call_timeout, provider.complete(prompt, JSON_ONLY_SYSTEM)).await {
            Err(_) => Err(ProviderFailure::timeout(format!(
                "no response within {}s",
                self.call_timeout.as_secs()
            ))),
            Ok(Err(e)) => Err(ProviderFailure::unparsable(e.to_string())),
            Ok(Ok(text)) => parse_provider_response(&text).map(ScoredRecord::new),
        };

        let processing_time_ms = started.elapsed().as_millis() as u64;
        match &outcome {
            Ok(scored) => debug!(
                provider = %provider_id,
                confidence = scored.confidence,
                elapsed_ms = processing_time_ms,
                "Provider succeeded"
            ),
            Err(failure) => warn!(
                provider = %provider_id,
                reason = ?failure.reason,
                detail = %failure.detail,
                elapsed_ms = processing_time_ms,
                "Provider failed"
            ),
        }

        ProviderResult {
            provider_id,
            processing_time_ms,
            outcome,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Mock providers for testing
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub mod mock {
    use async_trait::async_trait;
    use std::time::Duration;

    use crate::llm_client::{CompletionProvider, LlmError};

    pub enum MockBehavior {
        Reply(String),
        Fail,
        Hang,
    }

    pub struct MockProvider {
        pub name: &'static str,
        pub behavior: MockBehavior,
    }

    impl MockProvider {
        pub fn replying(name: &'static str, reply: &str) -> Self {
            Self {
                name,
                behavior: MockBehavior::Reply(reply.to_string()),
            }
        }

        pub fn failing(name: &'static str) -> Self {
            Self {
                name,
                behavior: MockBehavior::Fail,
            }
        }

        pub fn hanging(name: &'static str) -> Self {
            Self {
                name,
                behavior: MockBehavior::Hang,
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for MockProvider {
        fn id(&self) -> &str {
            self.name
        }

        async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            match &self.behavior {
                MockBehavior::Reply(text) => Ok(text.clone()),
                MockBehavior::Fail => Err(LlmError::Api {
                    status: 500,
                    message: "mock failure".to_string(),
                }),
                MockBehavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Err(LlmError::EmptyContent)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockProvider;
    use super::*;
    use crate::parsing::FailureReason;

    const GOOD_REPLY: &str =
        r#"{"personalInformation": {"fullName": "Jane Smith"}, "skills": ["Rust"]}"#;

    fn orchestrator(providers: Vec<Arc<dyn CompletionProvider>>) -> ProviderOrchestrator {
        ProviderOrchestrator::new(providers, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_blank_text_is_empty_input() {
        let orch = orchestrator(vec![Arc::new(MockProvider::replying("a", GOOD_REPLY))]);
        assert_eq!(orch.run("   ").await.unwrap_err(), ReconcileError::EmptyInput);
    }

    #[tokio::test]
    async fn test_zero_providers_yield_no_results() {
        let results = orchestrator(vec![]).run("Jane Smith").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_are_isolated_per_provider() {
        let orch = orchestrator(vec![
            Arc::new(MockProvider::failing("broken")),
            Arc::new(MockProvider::hanging("slow")),
            Arc::new(MockProvider::replying("garbled", "Sorry, I can't do that")),
            Arc::new(MockProvider::replying("good", GOOD_REPLY)),
        ]);
        let results = orch.run("Jane Smith").await.unwrap();

        assert_eq!(results.len(), 4);
        let ids: Vec<&str> = results.iter().map(|r| r.provider_id.as_str()).collect();
        assert_eq!(ids, vec!["broken", "slow", "garbled", "good"]);

        let reason = |i: usize| results[i].outcome.as_ref().unwrap_err().reason;
        assert_eq!(reason(0), FailureReason::UnparsableResponse);
        assert_eq!(reason(1), FailureReason::Timeout);
        assert_eq!(reason(2), FailureReason::UnparsableResponse);

        let good = results[3].outcome.as_ref().unwrap();
        assert_eq!(good.record.profile.personal_info.full_name, "Jane Smith");
        assert_eq!(good.confidence, 30);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_reported_at_configured_duration() {
        let orch = orchestrator(vec![Arc::new(MockProvider::hanging("slow"))]);
        let results = orch.run("Jane Smith").await.unwrap();
        assert!(!results[0].succeeded());
        assert!(results[0].processing_time_ms >= 5_000);
    }
}
