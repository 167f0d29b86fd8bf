// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    InvestorSummary, Problem, ProblemStatus, Recommendation, RecommendationSettings, Role,
    ScoreBreakdown, ScoringWeights, Solution, SolutionStatus, StudentProfile, User, UserProfile,
};
pub use requests::{
    split_list, CreateProblemRequest, CreateSolutionRequest, ForwardSolutionRequest,
    LoginRequest, MatchSkillsRequest, RegisterRequest, UpdateProfileRequest,
};
pub use responses::{AuthResponse, AuthUser, ErrorResponse, HealthResponse, MessageResponse};
