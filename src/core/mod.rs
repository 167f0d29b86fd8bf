// Core algorithm exports
pub mod normalize;
pub mod observer;
pub mod recommender;
pub mod scoring;
pub mod skill_match;

pub use normalize::{normalize_skill, problem_keywords, skills_match};
pub use observer::{NoopObserver, ScoringObserver, TracingObserver};
pub use recommender::Recommender;
pub use scoring::{score_problem, FactorScores, PreparedStudent, ScoringError};
pub use skill_match::{match_skills, SkillMatchReport};
