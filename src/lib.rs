//! Campus Connect - marketplace service for students, entrepreneurs and investors
//!
//! Entrepreneurs post problems, students submit solutions, and entrepreneurs
//! forward the promising ones to investors. The [`core`] module holds the
//! recommendation engine that ranks open problems for a student.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{normalize_skill, Recommender, ScoringObserver};
pub use error::ApiError;
pub use models::{Problem, Recommendation, RecommendationSettings, StudentProfile};
