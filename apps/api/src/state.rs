use std::sync::Arc;

use crate::parsing::ResumeParser;
use crate::reconcile::Reconciler;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub reconciler: Arc<Reconciler>,
    /// Generative path; runs on fallback extraction alone when no provider is configured.
    pub parser: Arc<ResumeParser>,
}
