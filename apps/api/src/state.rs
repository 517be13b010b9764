use std::sync::Arc;

use crate::ats::AtsScorer;
use crate::auth::TokenVerifier;
use crate::counselor::CounselorService;
use crate::resume::ResumeContext;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    /// Cache-backed resume access with optimistic concurrency.
    pub resumes: ResumeContext,
    pub verifier: Arc<dyn TokenVerifier>,
    /// Pluggable ATS scorer. Default: KeywordAtsScorer.
    pub ats: Arc<dyn AtsScorer>,
    pub counselor: CounselorService,
}
