use crate::models::domain::{Role, UserProfile};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request to create an account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub profile: UserProfile,
}

/// Login credentials; both fields are checked by hand to give the
/// "required" message instead of a validation dump
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Profile update; `skills` is a comma separated list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub skills: Option<String>,
    pub bio: Option<String>,
}

/// Request to post a problem; `requiredSkills` is a comma separated list
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProblemRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub domain: String,
    #[serde(default)]
    pub required_skills: String,
}

/// Request to submit a solution
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSolutionRequest {
    pub problem_id: Uuid,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(url)]
    pub document_link: Option<String>,
    #[validate(url)]
    pub prototype_link: Option<String>,
}

/// Request to forward a solution to an investor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardSolutionRequest {
    pub investor_id: Uuid,
    #[serde(default)]
    pub recommendation_note: Option<String>,
}

/// Request to compare a skill list against a problem's required skills
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSkillsRequest {
    #[serde(default)]
    pub student_skills: Vec<String>,
    #[serde(default)]
    pub problem_skills: Vec<String>,
}

/// Split a comma separated form field into trimmed, non-empty entries
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
