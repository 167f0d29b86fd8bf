use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Problem, Solution, User};

/// Errors that can occur when reading or writing marketplace records
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Persistence boundary for users, problems and solutions
///
/// Lookups return `Ok(None)` for a missing record; `Err` is reserved for
/// the store itself being unavailable or rejecting the write.
#[async_trait]
pub trait MarketplaceStore: Send + Sync {
    async fn create_user(&self, user: User) -> Result<User, StoreError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Replace the given profile fields; `None` leaves a field untouched
    async fn update_student_profile(
        &self,
        id: Uuid,
        skills: Option<Vec<String>>,
        bio: Option<String>,
    ) -> Result<Option<User>, StoreError>;

    async fn list_investors(&self) -> Result<Vec<User>, StoreError>;

    async fn create_problem(&self, problem: Problem) -> Result<Problem, StoreError>;

    async fn find_problem(&self, id: Uuid) -> Result<Option<Problem>, StoreError>;

    /// Open problems in creation order
    async fn list_open_problems(&self) -> Result<Vec<Problem>, StoreError>;

    /// Problems posted by `owner`, newest first
    async fn list_problems_by_owner(&self, owner: Uuid) -> Result<Vec<Problem>, StoreError>;

    async fn create_solution(&self, solution: Solution) -> Result<Solution, StoreError>;

    async fn find_solution(&self, id: Uuid) -> Result<Option<Solution>, StoreError>;

    async fn list_solutions_for_problem(&self, problem: Uuid) -> Result<Vec<Solution>, StoreError>;

    /// Add `investor` to the recipients and mark the solution forwarded
    async fn forward_solution(
        &self,
        id: Uuid,
        investor: Uuid,
        note: Option<String>,
    ) -> Result<Option<Solution>, StoreError>;

    /// Solutions forwarded to `investor`, newest first
    async fn list_forwarded_solutions(&self, investor: Uuid) -> Result<Vec<Solution>, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}
