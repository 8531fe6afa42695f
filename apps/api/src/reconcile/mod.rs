//! Resume reconciliation engine.
//!
//! Raw resume text is ground truth; structured-extractor and provider payloads
//! are untrusted. Each source is extracted independently, merged by fixed
//! priority, then validated and corrected against the text.

use thiserror::Error;

pub mod dedup;
pub mod extract;
pub mod handlers;
pub mod heuristics;
pub mod merge;
pub mod patterns;
pub mod payload;
pub mod pipeline;
pub mod validation;
pub mod vocabulary;

pub use pipeline::Reconciler;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("Raw resume text is required")]
    EmptyInput,

    #[error("Every configured provider failed")]
    AllProvidersFailed,
}
