use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marketplace role of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Entrepreneur,
    Investor,
}

/// Free-form profile attached to every account
///
/// Which fields are meaningful depends on the role; every field is optional
/// so that partially filled profiles deserialize cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub bio: Option<String>,
    pub contact_number: Option<String>,

    // Student
    pub skills: Vec<String>,
    pub university: Option<String>,
    pub resume_link: Option<String>,

    // Entrepreneur
    pub company_name: Option<String>,
    pub industry: Option<String>,

    // Investor
    pub investment_focus: Vec<String>,
    pub portfolio: Option<String>,
}

/// Registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: Role,
    #[serde(default)]
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
}

/// Investor entry as shown to entrepreneurs choosing where to forward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestorSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub profile: UserProfile,
}

impl From<User> for InvestorSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            profile: user.profile,
        }
    }
}

/// The part of a student's profile the recommender reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentProfile {
    pub skills: Vec<String>,
    pub bio: String,
}

impl StudentProfile {
    pub fn new(skills: Vec<String>, bio: impl Into<String>) -> Self {
        Self {
            skills,
            bio: bio.into(),
        }
    }
}

impl From<&UserProfile> for StudentProfile {
    fn from(profile: &UserProfile) -> Self {
        Self {
            skills: profile.skills.clone(),
            bio: profile.bio.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "problem_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProblemStatus {
    #[default]
    Open,
    Closed,
}

/// Problem statement posted by an entrepreneur
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub entrepreneur: Uuid,
    #[serde(default)]
    pub status: ProblemStatus,
    /// Records imported without a timestamp cannot be ranked by freshness
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Problem {
    pub fn is_open(&self) -> bool {
        self.status == ProblemStatus::Open
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "solution_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SolutionStatus {
    #[default]
    Pending,
    Reviewed,
    Shortlisted,
    Rejected,
    Forwarded,
}

/// Student submission against a problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub problem: Uuid,
    pub student: Uuid,
    pub description: String,
    pub document_link: Option<String>,
    pub prototype_link: Option<String>,
    pub status: SolutionStatus,
    pub entrepreneur_feedback: Option<String>,
    #[serde(default)]
    pub forwarded_to: Vec<Uuid>,
    pub recommendation_note: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Per-factor contribution to a recommendation score, each rounded on its own
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub skill_match: u8,
    pub bio_relevance: u8,
    pub skill_diversity: u8,
    pub complexity_match: u8,
    pub freshness: u8,
}

/// Ranked problem returned to a student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub problem: Problem,
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub matching_skills: Vec<String>,
}

/// Maximum contribution of each scoring factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub skill_match: f64,
    pub bio_relevance: f64,
    pub skill_diversity: f64,
    pub complexity_match: f64,
    pub freshness: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill_match: 40.0,
            bio_relevance: 25.0,
            skill_diversity: 15.0,
            complexity_match: 10.0,
            freshness: 10.0,
        }
    }
}

/// Ranking parameters for the recommender
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationSettings {
    pub weights: ScoringWeights,
    pub max_results: usize,
    /// Items scoring at or below this are dropped
    pub relevance_floor: u8,
    pub freshness_horizon_days: f64,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            max_results: 5,
            relevance_floor: 5,
            freshness_horizon_days: 30.0,
        }
    }
}
