use std::sync::Arc;

use crate::ats::extract::{DocumentTextExtractor, TextExtractor};
use crate::ats::scoring::{build_scorer, AtsScorer};
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable scorer. Default: WeightedKeywordScorer. Swap via ATS_SCORER env.
    pub scorer: Arc<dyn AtsScorer>,
    /// Document-to-text collaborator for uploaded resumes.
    pub extractor: Arc<dyn TextExtractor>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let scorer = build_scorer(config.scorer);
        AppState {
            config,
            scorer,
            extractor: Arc::new(DocumentTextExtractor),
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = extractor;
        self
    }
}
