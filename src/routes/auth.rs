use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::models::{
    split_list, AuthResponse, AuthUser, InvestorSummary, LoginRequest, MessageResponse,
    RegisterRequest, UpdateProfileRequest, User,
};
use crate::routes::{AppState, CurrentUser};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .route("/logout", web::post().to(logout))
        .route("/me", web::get().to(me))
        .route("/investors", web::get().to(investors))
        .route("/profile", web::put().to(update_profile));
}

fn session_cookie(state: &AppState, token: &str) -> Cookie<'static> {
    Cookie::build(state.auth.cookie_name().to_string(), token.to_string())
        .path("/")
        .http_only(true)
        .max_age(CookieDuration::seconds(state.auth.token_ttl().num_seconds()))
        .finish()
}

fn signed_in(state: &AppState, user: &User, created: bool) -> Result<HttpResponse, ApiError> {
    let token = state.auth.issue_token(user)?;
    let cookie = session_cookie(state, &token);
    let body = AuthResponse {
        token,
        user: AuthUser::from(user),
    };

    let mut response = if created {
        HttpResponse::Created()
    } else {
        HttpResponse::Ok()
    };
    Ok(response.cookie(cookie).json(body))
}

/// Register endpoint
///
/// POST /api/auth/register
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "email": "string",
///   "password": "string",
///   "role": "student|entrepreneur|investor",
///   "profile": { "skills": ["string"], "bio": "string" }
/// }
/// ```
async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    let req = req.into_inner();

    if state.store.find_user_by_email(&req.email).await?.is_some() {
        return Err(ApiError::BadRequest("User already exists".to_string()));
    }

    let auth = state.auth.clone();
    let password = req.password;
    let password_hash = web::block(move || auth.hash_password(&password)).await??;

    let user = state
        .store
        .create_user(User {
            id: Uuid::new_v4(),
            name: req.name,
            email: req.email,
            password_hash,
            role: req.role,
            profile: req.profile,
            created_at: chrono::Utc::now(),
        })
        .await?;

    tracing::info!("Registered user {} as {:?}", user.id, user.role);

    signed_in(&state, &user, true)
}

/// Login endpoint
///
/// POST /api/auth/login
async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest("Email and password are required".to_string()));
    }

    let invalid = || ApiError::BadRequest("Invalid Credentials".to_string());

    let Some(user) = state.store.find_user_by_email(&req.email).await? else {
        tracing::info!("Login failed: unknown email");
        return Err(invalid());
    };

    let auth = state.auth.clone();
    let password = req.into_inner().password;
    let hash = user.password_hash.clone();
    let matches = web::block(move || auth.verify_password(&password, &hash)).await??;

    if !matches {
        tracing::info!("Login failed: password mismatch for user {}", user.id);
        return Err(invalid());
    }

    tracing::info!("User {} logged in", user.id);

    signed_in(&state, &user, false)
}

/// Logout endpoint; clears the session cookie
async fn logout(state: web::Data<AppState>) -> HttpResponse {
    let mut cookie = Cookie::build(state.auth.cookie_name().to_string(), "")
        .path("/")
        .finish();
    cookie.make_removal();

    HttpResponse::Ok().cookie(cookie).json(MessageResponse {
        message: "Logged out successfully".to_string(),
    })
}

/// Current user without credentials
async fn me(state: web::Data<AppState>, current: CurrentUser) -> Result<HttpResponse, ApiError> {
    let user = state
        .store
        .find_user(current.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(user))
}

/// Investors available as forwarding targets
async fn investors(state: web::Data<AppState>, _current: CurrentUser) -> Result<HttpResponse, ApiError> {
    let investors: Vec<InvestorSummary> = state
        .store
        .list_investors()
        .await?
        .into_iter()
        .map(InvestorSummary::from)
        .collect();

    Ok(HttpResponse::Ok().json(investors))
}

/// Update skills and bio
///
/// PUT /api/auth/profile
///
/// Request body:
/// ```json
/// { "skills": "React, Node.js", "bio": "string" }
/// ```
/// Empty or absent fields are left unchanged.
async fn update_profile(
    state: web::Data<AppState>,
    current: CurrentUser,
    req: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();
    let skills = req.skills.filter(|s| !s.trim().is_empty()).map(|s| split_list(&s));
    let bio = req.bio.filter(|b| !b.is_empty());

    let user = state
        .store
        .update_student_profile(current.user_id, skills, bio)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    tracing::info!("Updated profile for user {}", user.id);

    Ok(HttpResponse::Ok().json(user))
}
