use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::core::normalize::{normalize_skill, problem_keywords, skills_match};
use crate::models::{Problem, Recommendation, RecommendationSettings, ScoreBreakdown, StudentProfile};

/// Reasons a single problem cannot be scored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("problem has no identifier")]
    MissingId,

    #[error("problem {0} has no creation timestamp")]
    MissingTimestamp(Uuid),
}

/// Raw, unrounded factor values
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FactorScores {
    pub skill_match: f64,
    pub bio_relevance: f64,
    pub skill_diversity: f64,
    pub complexity_match: f64,
    pub freshness: f64,
}

impl FactorScores {
    pub fn total(&self) -> f64 {
        self.skill_match + self.bio_relevance + self.skill_diversity + self.complexity_match + self.freshness
    }

    /// Each factor is rounded independently, so the result need not sum to the total score
    pub fn breakdown(&self) -> ScoreBreakdown {
        ScoreBreakdown {
            skill_match: round_to_u8(self.skill_match),
            bio_relevance: round_to_u8(self.bio_relevance),
            skill_diversity: round_to_u8(self.skill_diversity),
            complexity_match: round_to_u8(self.complexity_match),
            freshness: round_to_u8(self.freshness),
        }
    }
}

/// Student skills prepared once per ranking call
#[derive(Debug, Clone)]
pub struct PreparedStudent<'a> {
    profile: &'a StudentProfile,
    normalized_skills: Vec<String>,
    bio_lower: String,
}

impl<'a> PreparedStudent<'a> {
    pub fn new(profile: &'a StudentProfile) -> Self {
        Self {
            profile,
            normalized_skills: profile.skills.iter().map(|s| normalize_skill(s)).collect(),
            bio_lower: profile.bio.to_lowercase(),
        }
    }

    fn skill_count(&self) -> usize {
        self.profile.skills.len()
    }
}

/// Score one problem for a student
///
/// score = round(
///     skill_match      (40)  # required skills covered by the student
///   + bio_relevance    (25)  # problem keywords found in bio or skills
///   + skill_diversity  (15)  # share of the student's skills exercised
///   + complexity_match (10)  # student skill count vs required count
///   + freshness        (10)  # linear decay over the horizon
/// ), capped at 100
pub fn score_problem(
    student: &PreparedStudent<'_>,
    problem: &Problem,
    settings: &RecommendationSettings,
    now: DateTime<Utc>,
) -> Result<Recommendation, ScoringError> {
    if problem.id.is_nil() {
        return Err(ScoringError::MissingId);
    }
    let created_at = problem
        .created_at
        .ok_or(ScoringError::MissingTimestamp(problem.id))?;

    let weights = &settings.weights;
    let (match_count, matching_skills) = match_required_skills(student, problem);
    let required_count = problem.required_skills.len();
    let student_count = student.skill_count();

    let factors = FactorScores {
        skill_match: weights.skill_match * ratio(match_count, required_count),
        bio_relevance: weights.bio_relevance * bio_relevance_ratio(student, problem),
        skill_diversity: weights.skill_diversity * ratio(match_count, student_count),
        complexity_match: weights.complexity_match * complexity_ratio(student_count, required_count),
        freshness: weights.freshness
            * freshness_ratio(created_at, now, settings.freshness_horizon_days),
    };

    Ok(Recommendation {
        problem: problem.clone(),
        score: round_to_u8(factors.total()),
        breakdown: factors.breakdown(),
        matching_skills,
    })
}

/// Count required skills covered by any student skill, and collect the
/// student skills (original spelling, student order) that covered something
fn match_required_skills(student: &PreparedStudent<'_>, problem: &Problem) -> (usize, Vec<String>) {
    let mut used = vec![false; student.normalized_skills.len()];
    let mut match_count = 0;

    for required in &problem.required_skills {
        let required = normalize_skill(required);
        let mut matched = false;
        for (i, skill) in student.normalized_skills.iter().enumerate() {
            if skills_match(skill, &required) {
                used[i] = true;
                matched = true;
            }
        }
        if matched {
            match_count += 1;
        }
    }

    let mut matching_skills: Vec<String> = Vec::new();
    for (skill, _) in student.profile.skills.iter().zip(&used).filter(|(_, u)| **u) {
        if !matching_skills.contains(skill) {
            matching_skills.push(skill.clone());
        }
    }

    (match_count, matching_skills)
}

fn bio_relevance_ratio(student: &PreparedStudent<'_>, problem: &Problem) -> f64 {
    let keywords = problem_keywords(problem);

    let matched = keywords
        .iter()
        .filter(|word| {
            if student.bio_lower.contains(word.as_str()) {
                return true;
            }
            let word = normalize_skill(word);
            !word.is_empty() && student.normalized_skills.iter().any(|s| s.contains(&word))
        })
        .count();

    ratio(matched, keywords.len())
}

fn complexity_ratio(student_count: usize, required_count: usize) -> f64 {
    if student_count == 0 || required_count == 0 {
        return 0.0;
    }
    (student_count as f64 / required_count as f64).min(1.0)
}

/// 1.0 for a brand new problem, falling linearly to 0.0 at the horizon
fn freshness_ratio(created_at: DateTime<Utc>, now: DateTime<Utc>, horizon_days: f64) -> f64 {
    if horizon_days <= 0.0 {
        return 0.0;
    }
    let days_old = (now - created_at).num_milliseconds() as f64 / 86_400_000.0;
    ((horizon_days - days_old) / horizon_days).clamp(0.0, 1.0)
}

/// `part / whole` capped at 1.0, or 0.0 when `whole` is zero
#[inline]
fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64).min(1.0)
}

#[inline]
fn round_to_u8(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
