use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::time::Duration;
use uuid::Uuid;

use crate::models::{Problem, Role, Solution, User, UserProfile};
use crate::services::store::{MarketplaceStore, StoreError};

const USER_COLUMNS: &str = "id, name, email, password_hash, role, profile, created_at";
const PROBLEM_COLUMNS: &str =
    "id, title, description, domain, required_skills, entrepreneur, status, created_at";
const SOLUTION_COLUMNS: &str = "id, problem, student, description, document_link, prototype_link, \
     status, entrepreneur_feedback, forwarded_to, recommendation_note, submitted_at";

/// PostgreSQL-backed marketplace store
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect and run pending migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a store from optional settings, filling in defaults
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

fn user_from_row(row: &PgRow) -> Result<User, sqlx::Error> {
    let profile: Json<UserProfile> = row.try_get("profile")?;
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        role: row.try_get("role")?,
        profile: profile.0,
        created_at: row.try_get("created_at")?,
    })
}

fn problem_from_row(row: &PgRow) -> Result<Problem, sqlx::Error> {
    Ok(Problem {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        domain: row.try_get("domain")?,
        required_skills: row.try_get("required_skills")?,
        entrepreneur: row.try_get("entrepreneur")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
    })
}

fn solution_from_row(row: &PgRow) -> Result<Solution, sqlx::Error> {
    Ok(Solution {
        id: row.try_get("id")?,
        problem: row.try_get("problem")?,
        student: row.try_get("student")?,
        description: row.try_get("description")?,
        document_link: row.try_get("document_link")?,
        prototype_link: row.try_get("prototype_link")?,
        status: row.try_get("status")?,
        entrepreneur_feedback: row.try_get("entrepreneur_feedback")?,
        forwarded_to: row.try_get("forwarded_to")?,
        recommendation_note: row.try_get("recommendation_note")?,
        submitted_at: row.try_get("submitted_at")?,
    })
}

fn collect<T>(rows: &[PgRow], map: fn(&PgRow) -> Result<T, sqlx::Error>) -> Result<Vec<T>, StoreError> {
    rows.iter().map(map).collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

#[async_trait]
impl MarketplaceStore for PostgresStore {
    async fn create_user(&self, user: User) -> Result<User, StoreError> {
        let query = r#"
            INSERT INTO users (id, name, email, password_hash, role, profile, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#;

        sqlx::query(query)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role)
            .bind(Json(&user.profile))
            .bind(user.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    StoreError::Conflict(format!("email {} already registered", user.email))
                }
                other => StoreError::SqlxError(other),
            })?;

        tracing::debug!("Created user {} ({:?})", user.id, user.role);

        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query(&query).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(user_from_row).transpose()?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        let row = sqlx::query(&query).bind(email).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(user_from_row).transpose()?)
    }

    async fn update_student_profile(
        &self,
        id: Uuid,
        skills: Option<Vec<String>>,
        bio: Option<String>,
    ) -> Result<Option<User>, StoreError> {
        // Absent fields become JSON nulls and are stripped, so the merge leaves them untouched
        let query = format!(
            "UPDATE users \
             SET profile = profile || jsonb_strip_nulls(jsonb_build_object('skills', $2::jsonb, 'bio', $3::text)) \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query(&query)
            .bind(id)
            .bind(skills.map(Json))
            .bind(bio)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row).transpose()?)
    }

    async fn list_investors(&self) -> Result<Vec<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE role = $1 ORDER BY created_at");
        let rows = sqlx::query(&query).bind(Role::Investor).fetch_all(&self.pool).await?;
        collect(&rows, user_from_row)
    }

    async fn create_problem(&self, problem: Problem) -> Result<Problem, StoreError> {
        let query = r#"
            INSERT INTO problems (id, title, description, domain, required_skills, entrepreneur, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#;

        sqlx::query(query)
            .bind(problem.id)
            .bind(&problem.title)
            .bind(&problem.description)
            .bind(&problem.domain)
            .bind(&problem.required_skills)
            .bind(problem.entrepreneur)
            .bind(problem.status)
            .bind(problem.created_at)
            .execute(&self.pool)
            .await?;

        Ok(problem)
    }

    async fn find_problem(&self, id: Uuid) -> Result<Option<Problem>, StoreError> {
        let query = format!("SELECT {PROBLEM_COLUMNS} FROM problems WHERE id = $1");
        let row = sqlx::query(&query).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(problem_from_row).transpose()?)
    }

    async fn list_open_problems(&self) -> Result<Vec<Problem>, StoreError> {
        let query = format!(
            "SELECT {PROBLEM_COLUMNS} FROM problems WHERE status = 'open' ORDER BY created_at NULLS LAST, id"
        );
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        collect(&rows, problem_from_row)
    }

    async fn list_problems_by_owner(&self, owner: Uuid) -> Result<Vec<Problem>, StoreError> {
        let query = format!(
            "SELECT {PROBLEM_COLUMNS} FROM problems WHERE entrepreneur = $1 ORDER BY created_at DESC NULLS LAST"
        );
        let rows = sqlx::query(&query).bind(owner).fetch_all(&self.pool).await?;
        collect(&rows, problem_from_row)
    }

    async fn create_solution(&self, solution: Solution) -> Result<Solution, StoreError> {
        let query = r#"
            INSERT INTO solutions (id, problem, student, description, document_link, prototype_link,
                                   status, entrepreneur_feedback, forwarded_to, recommendation_note, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#;

        sqlx::query(query)
            .bind(solution.id)
            .bind(solution.problem)
            .bind(solution.student)
            .bind(&solution.description)
            .bind(&solution.document_link)
            .bind(&solution.prototype_link)
            .bind(solution.status)
            .bind(&solution.entrepreneur_feedback)
            .bind(&solution.forwarded_to)
            .bind(&solution.recommendation_note)
            .bind(solution.submitted_at)
            .execute(&self.pool)
            .await?;

        Ok(solution)
    }

    async fn find_solution(&self, id: Uuid) -> Result<Option<Solution>, StoreError> {
        let query = format!("SELECT {SOLUTION_COLUMNS} FROM solutions WHERE id = $1");
        let row = sqlx::query(&query).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(solution_from_row).transpose()?)
    }

    async fn list_solutions_for_problem(&self, problem: Uuid) -> Result<Vec<Solution>, StoreError> {
        let query = format!("SELECT {SOLUTION_COLUMNS} FROM solutions WHERE problem = $1 ORDER BY submitted_at");
        let rows = sqlx::query(&query).bind(problem).fetch_all(&self.pool).await?;
        collect(&rows, solution_from_row)
    }

    async fn forward_solution(
        &self,
        id: Uuid,
        investor: Uuid,
        note: Option<String>,
    ) -> Result<Option<Solution>, StoreError> {
        let query = format!(
            r#"
            UPDATE solutions SET
                forwarded_to = CASE
                    WHEN $2 = ANY(forwarded_to) THEN forwarded_to
                    ELSE array_append(forwarded_to, $2)
                END,
                recommendation_note = COALESCE($3, recommendation_note),
                status = 'forwarded'
            WHERE id = $1
            RETURNING {SOLUTION_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(id)
            .bind(investor)
            .bind(note)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(solution_from_row).transpose()?)
    }

    async fn list_forwarded_solutions(&self, investor: Uuid) -> Result<Vec<Solution>, StoreError> {
        let query = format!(
            "SELECT {SOLUTION_COLUMNS} FROM solutions WHERE $1 = ANY(forwarded_to) ORDER BY submitted_at DESC"
        );
        let rows = sqlx::query(&query).bind(investor).fetch_all(&self.pool).await?;
        collect(&rows, solution_from_row)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProblemStatus;
    use chrono::Utc;

    #[tokio::test]
    #[ignore = "Requires PostgreSQL"]
    async fn test_problem_round_trip() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let store = PostgresStore::from_settings(&url, Some(2), Some(1), None, None)
            .await
            .expect("Failed to connect");

        let owner = store
            .create_user(User {
                id: Uuid::new_v4(),
                name: "Owner".to_string(),
                email: format!("{}@example.com", Uuid::new_v4()),
                password_hash: "x".to_string(),
                role: Role::Entrepreneur,
                profile: UserProfile::default(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        let problem = store
            .create_problem(Problem {
                id: Uuid::new_v4(),
                title: "Title".to_string(),
                description: "Description".to_string(),
                domain: "Domain".to_string(),
                required_skills: vec!["Rust".to_string()],
                entrepreneur: owner.id,
                status: ProblemStatus::Open,
                created_at: Some(Utc::now()),
            })
            .await
            .unwrap();

        let found = store.find_problem(problem.id).await.unwrap().unwrap();
        assert_eq!(found.required_skills, vec!["Rust"]);
        assert!(store.health_check().await.unwrap());
    }

    #[tokio::test]
    #[ignore = "Requires PostgreSQL"]
    async fn test_concurrent_profile_updates_both_apply() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let store = PostgresStore::from_settings(&url, Some(4), Some(1), None, None)
            .await
            .expect("Failed to connect");

        let student = store
            .create_user(User {
                id: Uuid::new_v4(),
                name: "Student".to_string(),
                email: format!("{}@example.com", Uuid::new_v4()),
                password_hash: "x".to_string(),
                role: Role::Student,
                profile: UserProfile {
                    university: Some("KMIT".to_string()),
                    ..UserProfile::default()
                },
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        let (skills, bio) = tokio::join!(
            store.update_student_profile(student.id, Some(vec!["Rust".to_string()]), None),
            store.update_student_profile(student.id, None, Some("Systems".to_string())),
        );
        assert!(skills.unwrap().is_some());
        assert!(bio.unwrap().is_some());

        let profile = store.find_user(student.id).await.unwrap().unwrap().profile;
        assert_eq!(profile.skills, vec!["Rust"]);
        assert_eq!(profile.bio.as_deref(), Some("Systems"));
        assert_eq!(profile.university.as_deref(), Some("KMIT"));

        assert!(store.update_student_profile(Uuid::new_v4(), None, None).await.unwrap().is_none());
    }
}
