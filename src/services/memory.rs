use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Problem, Role, Solution, SolutionStatus, User};
use crate::services::store::{MarketplaceStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    users: Vec<User>,
    problems: Vec<Problem>,
    solutions: Vec<Solution>,
}

/// Process-local store used for tests and database-less local runs
///
/// Records are kept in insertion order, so catalog listings are stable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MarketplaceStore for MemoryStore {
    async fn create_user(&self, user: User) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(StoreError::Conflict(format!("email {} already registered", user.email)));
        }
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.email.eq_ignore_ascii_case(email)).cloned())
    }

    async fn update_student_profile(
        &self,
        id: Uuid,
        skills: Option<Vec<String>>,
        bio: Option<String>,
    ) -> Result<Option<User>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(user) = inner.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(skills) = skills {
            user.profile.skills = skills;
        }
        if let Some(bio) = bio {
            user.profile.bio = Some(bio);
        }
        Ok(Some(user.clone()))
    }

    async fn list_investors(&self) -> Result<Vec<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().filter(|u| u.role == Role::Investor).cloned().collect())
    }

    async fn create_problem(&self, problem: Problem) -> Result<Problem, StoreError> {
        self.inner.write().await.problems.push(problem.clone());
        Ok(problem)
    }

    async fn find_problem(&self, id: Uuid) -> Result<Option<Problem>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.problems.iter().find(|p| p.id == id).cloned())
    }

    async fn list_open_problems(&self) -> Result<Vec<Problem>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.problems.iter().filter(|p| p.is_open()).cloned().collect())
    }

    async fn list_problems_by_owner(&self, owner: Uuid) -> Result<Vec<Problem>, StoreError> {
        let inner = self.inner.read().await;
        let mut problems: Vec<Problem> = inner
            .problems
            .iter()
            .filter(|p| p.entrepreneur == owner)
            .cloned()
            .collect();
        problems.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(problems)
    }

    async fn create_solution(&self, solution: Solution) -> Result<Solution, StoreError> {
        self.inner.write().await.solutions.push(solution.clone());
        Ok(solution)
    }

    async fn find_solution(&self, id: Uuid) -> Result<Option<Solution>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.solutions.iter().find(|s| s.id == id).cloned())
    }

    async fn list_solutions_for_problem(&self, problem: Uuid) -> Result<Vec<Solution>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.solutions.iter().filter(|s| s.problem == problem).cloned().collect())
    }

    async fn forward_solution(
        &self,
        id: Uuid,
        investor: Uuid,
        note: Option<String>,
    ) -> Result<Option<Solution>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(solution) = inner.solutions.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        if !solution.forwarded_to.contains(&investor) {
            solution.forwarded_to.push(investor);
        }
        if note.is_some() {
            solution.recommendation_note = note;
        }
        solution.status = SolutionStatus::Forwarded;
        Ok(Some(solution.clone()))
    }

    async fn list_forwarded_solutions(&self, investor: Uuid) -> Result<Vec<Solution>, StoreError> {
        let inner = self.inner.read().await;
        let mut solutions: Vec<Solution> = inner
            .solutions
            .iter()
            .filter(|s| s.forwarded_to.contains(&investor))
            .cloned()
            .collect();
        solutions.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(solutions)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
