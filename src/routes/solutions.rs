use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::models::{CreateSolutionRequest, ForwardSolutionRequest, Problem, Role, Solution, SolutionStatus};
use crate::routes::{AppState, CurrentUser};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create))
        .route("/forwarded", web::get().to(list_forwarded))
        .route("/problem/{problem_id}", web::get().to(list_for_problem))
        .route("/{solution_id}/forward", web::post().to(forward));
}

/// Load a problem and check the caller posted it
async fn owned_problem(state: &AppState, problem_id: Uuid, current: &CurrentUser) -> Result<Problem, ApiError> {
    let problem = state
        .store
        .find_problem(problem_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Problem not found".to_string()))?;

    if problem.entrepreneur != current.user_id {
        return Err(ApiError::Forbidden("Not authorized".to_string()));
    }

    Ok(problem)
}

/// Submit a solution
///
/// POST /api/solutions
///
/// Request body:
/// ```json
/// {
///   "problemId": "uuid",
///   "description": "string",
///   "documentLink": "https://...",
///   "prototypeLink": "https://..."
/// }
/// ```
async fn create(
    state: web::Data<AppState>,
    current: CurrentUser,
    req: web::Json<CreateSolutionRequest>,
) -> Result<HttpResponse, ApiError> {
    current.require(Role::Student)?;
    req.validate()?;
    let req = req.into_inner();

    let problem = state
        .store
        .find_problem(req.problem_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Problem not found".to_string()))?;

    if !problem.is_open() {
        return Err(ApiError::BadRequest("Problem is closed".to_string()));
    }

    let solution = state
        .store
        .create_solution(Solution {
            id: Uuid::new_v4(),
            problem: problem.id,
            student: current.user_id,
            description: req.description,
            document_link: req.document_link,
            prototype_link: req.prototype_link,
            status: SolutionStatus::Pending,
            entrepreneur_feedback: None,
            forwarded_to: Vec::new(),
            recommendation_note: None,
            submitted_at: chrono::Utc::now(),
        })
        .await?;

    tracing::info!("Student {} submitted solution {} for problem {}", current.user_id, solution.id, problem.id);

    Ok(HttpResponse::Created().json(solution))
}

/// Solutions submitted for one of the caller's problems
///
/// GET /api/solutions/problem/{problemId}
async fn list_for_problem(
    state: web::Data<AppState>,
    current: CurrentUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let problem = owned_problem(&state, path.into_inner(), &current).await?;

    let solutions = state.store.list_solutions_for_problem(problem.id).await?;
    Ok(HttpResponse::Ok().json(solutions))
}

/// Forward a solution to an investor
///
/// POST /api/solutions/{solutionId}/forward
///
/// Request body:
/// ```json
/// { "investorId": "uuid", "recommendationNote": "string" }
/// ```
async fn forward(
    state: web::Data<AppState>,
    current: CurrentUser,
    path: web::Path<Uuid>,
    req: web::Json<ForwardSolutionRequest>,
) -> Result<HttpResponse, ApiError> {
    current.require(Role::Entrepreneur)?;
    let solution_id = path.into_inner();
    let req = req.into_inner();

    let solution = state
        .store
        .find_solution(solution_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Solution not found".to_string()))?;

    owned_problem(&state, solution.problem, &current).await?;

    let is_investor = state
        .store
        .find_user(req.investor_id)
        .await?
        .is_some_and(|u| u.role == Role::Investor);
    if !is_investor {
        return Err(ApiError::NotFound("Investor not found".to_string()));
    }

    let solution = state
        .store
        .forward_solution(solution_id, req.investor_id, req.recommendation_note)
        .await?
        .ok_or_else(|| ApiError::NotFound("Solution not found".to_string()))?;

    tracing::info!("Solution {} forwarded to investor {}", solution.id, req.investor_id);

    Ok(HttpResponse::Ok().json(solution))
}

/// Solutions forwarded to the calling investor, newest first
///
/// GET /api/solutions/forwarded
async fn list_forwarded(state: web::Data<AppState>, current: CurrentUser) -> Result<HttpResponse, ApiError> {
    current.require(Role::Investor)?;

    let solutions = state.store.list_forwarded_solutions(current.user_id).await?;
    Ok(HttpResponse::Ok().json(solutions))
}
