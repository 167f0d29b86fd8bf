use uuid::Uuid;

use crate::core::scoring::ScoringError;
use crate::models::Recommendation;

/// Diagnostic hook called by the recommender while it ranks a catalog
///
/// All methods default to no-ops so implementors only pick what they need.
pub trait ScoringObserver: Send + Sync {
    fn on_scored(&self, _recommendation: &Recommendation) {}

    fn on_skipped(&self, _problem_id: Uuid, _error: &ScoringError) {}

    fn on_ranked(&self, _considered: usize, _returned: usize) {}
}

/// Observer that forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ScoringObserver for TracingObserver {
    fn on_scored(&self, recommendation: &Recommendation) {
        tracing::trace!(
            problem_id = %recommendation.problem.id,
            score = recommendation.score,
            breakdown = ?recommendation.breakdown,
            "Scored problem"
        );
    }

    fn on_skipped(&self, problem_id: Uuid, error: &ScoringError) {
        tracing::warn!(problem_id = %problem_id, "Skipping problem during scoring: {}", error);
    }

    fn on_ranked(&self, considered: usize, returned: usize) {
        tracing::debug!(considered, returned, "Ranked recommendations");
    }
}

/// Observer that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScoringObserver for NoopObserver {}
