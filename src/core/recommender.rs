use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::observer::{ScoringObserver, TracingObserver};
use crate::core::scoring::{score_problem, PreparedStudent};
use crate::models::{Problem, Recommendation, RecommendationSettings, StudentProfile};

/// Ranks a problem catalog for a student
///
/// # Pipeline Stages
/// 1. Drop anything that is not open
/// 2. Score each problem, skipping malformed records
/// 3. Stable sort by score, descending
/// 4. Keep the top `max_results`
/// 5. Drop items at or below the relevance floor
#[derive(Clone)]
pub struct Recommender {
    settings: RecommendationSettings,
    observer: Arc<dyn ScoringObserver>,
}

impl Recommender {
    pub fn new(settings: RecommendationSettings) -> Self {
        Self {
            settings,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_default_settings() -> Self {
        Self::new(RecommendationSettings::default())
    }

    /// Replace the diagnostic hook
    pub fn with_observer(mut self, observer: Arc<dyn ScoringObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn settings(&self) -> &RecommendationSettings {
        &self.settings
    }

    /// Recommend problems as of the current time
    pub fn recommend(&self, student: &StudentProfile, problems: &[Problem]) -> Vec<Recommendation> {
        self.recommend_at(student, problems, Utc::now())
    }

    /// Recommend problems as of `now`
    ///
    /// The result is fully determined by the arguments.
    pub fn recommend_at(
        &self,
        student: &StudentProfile,
        problems: &[Problem],
        now: DateTime<Utc>,
    ) -> Vec<Recommendation> {
        let prepared = PreparedStudent::new(student);

        let mut ranked: Vec<Recommendation> = problems
            .iter()
            .filter(|problem| problem.is_open())
            .filter_map(|problem| match score_problem(&prepared, problem, &self.settings, now) {
                Ok(recommendation) => {
                    self.observer.on_scored(&recommendation);
                    Some(recommendation)
                }
                Err(e) => {
                    self.observer.on_skipped(problem.id, &e);
                    None
                }
            })
            .collect();

        let considered = ranked.len();

        // `sort_by` is stable, so ties keep catalog order
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(self.settings.max_results);
        ranked.retain(|r| r.score > self.settings.relevance_floor);

        self.observer.on_ranked(considered, ranked.len());

        ranked
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_settings()
    }
}

impl fmt::Debug for Recommender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recommender")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scoring::ScoringError;
    use crate::models::ProblemStatus;
    use chrono::Duration;
    use std::sync::Mutex;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn create_problem(title: &str, skills: &[&str], days_old: i64) -> Problem {
        Problem {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            domain: "General".to_string(),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            entrepreneur: Uuid::new_v4(),
            status: ProblemStatus::Open,
            created_at: Some(now() - Duration::days(days_old)),
        }
    }

    fn student(skills: &[&str]) -> StudentProfile {
        StudentProfile::new(skills.iter().map(|s| s.to_string()).collect(), "")
    }

    #[derive(Default)]
    struct RecordingObserver {
        scored: Mutex<usize>,
        skipped: Mutex<Vec<Uuid>>,
    }

    impl ScoringObserver for RecordingObserver {
        fn on_scored(&self, _recommendation: &Recommendation) {
            *self.scored.lock().unwrap() += 1;
        }

        fn on_skipped(&self, problem_id: Uuid, _error: &ScoringError) {
            self.skipped.lock().unwrap().push(problem_id);
        }
    }

    #[test]
    fn test_empty_catalog() {
        let recommender = Recommender::with_default_settings();
        assert!(recommender.recommend_at(&student(&["Rust"]), &[], now()).is_empty());
    }

    #[test]
    fn test_closed_problems_filtered() {
        let recommender = Recommender::with_default_settings();
        let mut closed = create_problem("Closed", &["Rust"], 0);
        closed.status = ProblemStatus::Closed;
        let open = create_problem("Open", &["Rust"], 0);

        let result = recommender.recommend_at(&student(&["Rust"]), &[closed, open.clone()], now());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].problem.id, open.id);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let recommender = Recommender::with_default_settings();
        let catalog = vec![
            create_problem("Zeta", &["Rust"], 0),
            create_problem("Alpha", &["Rust"], 0),
            create_problem("Mid", &["Rust"], 0),
        ];

        let result = recommender.recommend_at(&student(&["Rust"]), &catalog, now());

        let ids: Vec<Uuid> = result.iter().map(|r| r.problem.id).collect();
        let expected: Vec<Uuid> = catalog.iter().map(|p| p.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_malformed_problem_skipped() {
        let observer = Arc::new(RecordingObserver::default());
        let recommender = Recommender::with_default_settings().with_observer(observer.clone());

        let mut broken = create_problem("Broken", &["Rust"], 0);
        broken.created_at = None;
        let good = create_problem("Good", &["Rust"], 0);

        let result = recommender.recommend_at(&student(&["Rust"]), &[broken.clone(), good.clone()], now());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].problem.id, good.id);
        assert_eq!(*observer.skipped.lock().unwrap(), vec![broken.id]);
        assert_eq!(*observer.scored.lock().unwrap(), 1);
    }

    #[test]
    fn test_floor_applied_after_truncation() {
        let settings = RecommendationSettings {
            max_results: 2,
            ..RecommendationSettings::default()
        };
        let recommender = Recommender::new(settings);
        let catalog = vec![
            create_problem("A", &["Rust"], 0),
            create_problem("B", &["Rust"], 0),
            create_problem("C", &["Rust"], 0),
        ];

        let result = recommender.recommend_at(&student(&["Rust"]), &catalog, now());

        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_noop_observer_does_not_change_ranking() {
        let catalog = vec![
            create_problem("Parser", &["Rust"], 0),
            create_problem("Legacy", &["Cobol"], 45),
            create_problem("Compiler", &["Rust", "LLVM"], 3),
        ];
        let quiet = Recommender::with_default_settings().with_observer(Arc::new(crate::core::NoopObserver));

        assert_eq!(
            quiet.recommend_at(&student(&["Rust"]), &catalog, now()),
            Recommender::with_default_settings().recommend_at(&student(&["Rust"]), &catalog, now())
        );
    }
}
