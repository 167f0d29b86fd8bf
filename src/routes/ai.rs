use actix_web::{web, HttpResponse};

use crate::core::match_skills;
use crate::error::ApiError;
use crate::models::{MatchSkillsRequest, Recommendation, StudentProfile};
use crate::routes::{AppState, CurrentUser};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/recommendations", web::get().to(recommendations))
        .route("/match-skills", web::post().to(match_skills_handler));
}

/// Ranked problems for the calling student
///
/// GET /api/ai/recommendations
///
/// Returns the recommender output verbatim: an array of up to five
/// `{problem, score, breakdown, matchingSkills}` objects. An unknown user
/// gets an empty array; a store failure is an error, never a partial list.
async fn recommendations(state: web::Data<AppState>, current: CurrentUser) -> Result<HttpResponse, ApiError> {
    let Some(user) = state.store.find_user(current.user_id).await? else {
        tracing::warn!("Recommendations requested for unknown user {}", current.user_id);
        return Ok(HttpResponse::Ok().json(Vec::<Recommendation>::new()));
    };

    let student = StudentProfile::from(&user.profile);
    let catalog = state.catalog.open_problems(state.store.as_ref()).await?;

    let recommendations = state.recommender.recommend(&student, &catalog);

    tracing::info!(
        "Returning {} recommendations for user {} (from {} problems)",
        recommendations.len(),
        user.id,
        catalog.len()
    );

    Ok(HttpResponse::Ok().json(recommendations))
}

/// Compare a skill list against a problem's required skills
///
/// POST /api/ai/match-skills
///
/// Request body:
/// ```json
/// { "studentSkills": ["string"], "problemSkills": ["string"] }
/// ```
async fn match_skills_handler(
    _current: CurrentUser,
    req: web::Json<MatchSkillsRequest>,
) -> HttpResponse {
    HttpResponse::Ok().json(match_skills(&req.student_skills, &req.problem_skills))
}
