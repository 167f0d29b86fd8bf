use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::models::{split_list, CreateProblemRequest, Problem, ProblemStatus, Role};
use crate::routes::{AppState, CurrentUser};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_open))
        .route("", web::post().to(create))
        .route("/my", web::get().to(list_mine));
}

/// Open problems for students to browse
///
/// GET /api/problems
async fn list_open(state: web::Data<AppState>, _current: CurrentUser) -> Result<HttpResponse, ApiError> {
    let problems = state.catalog.open_problems(state.store.as_ref()).await?;
    Ok(HttpResponse::Ok().json(problems.as_slice()))
}

/// Post a new problem
///
/// POST /api/problems
///
/// Request body:
/// ```json
/// {
///   "title": "string",
///   "description": "string",
///   "domain": "string",
///   "requiredSkills": "React, Node.js"
/// }
/// ```
async fn create(
    state: web::Data<AppState>,
    current: CurrentUser,
    req: web::Json<CreateProblemRequest>,
) -> Result<HttpResponse, ApiError> {
    current.require(Role::Entrepreneur)?;
    req.validate()?;
    let req = req.into_inner();

    let problem = state
        .store
        .create_problem(Problem {
            id: Uuid::new_v4(),
            title: req.title,
            description: req.description,
            domain: req.domain,
            required_skills: split_list(&req.required_skills),
            entrepreneur: current.user_id,
            status: ProblemStatus::Open,
            created_at: Some(chrono::Utc::now()),
        })
        .await?;

    state.catalog.invalidate().await;

    tracing::info!("User {} posted problem {}", current.user_id, problem.id);

    Ok(HttpResponse::Created().json(problem))
}

/// Problems posted by the caller, newest first
///
/// GET /api/problems/my
async fn list_mine(state: web::Data<AppState>, current: CurrentUser) -> Result<HttpResponse, ApiError> {
    current.require(Role::Entrepreneur)?;

    let problems = state.store.list_problems_by_owner(current.user_id).await?;
    Ok(HttpResponse::Ok().json(problems))
}
