use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::Role;
use crate::routes::AppState;

/// Caller identity resolved from the session token
///
/// The token is read from the session cookie first, then from an
/// `Authorization: Bearer` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl CurrentUser {
    /// Reject callers that do not hold `role`
    pub fn require(&self, role: Role) -> Result<(), ApiError> {
        if self.role != role {
            return Err(ApiError::Forbidden(format!(
                "Only {:?} accounts may do this",
                role
            )));
        }
        Ok(())
    }
}

impl FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<CurrentUser, ApiError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ApiError::Internal("application state not configured".to_string()))?;

    let token = req
        .cookie(state.auth.cookie_name())
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
        .or_else(|| bearer_token(req));

    let Some(token) = token else {
        tracing::debug!("No token on {} {}", req.method(), req.path());
        return Err(ApiError::Unauthorized("No token, authorization denied".to_string()));
    };

    let claims = state.auth.verify_token(&token).map_err(|e| {
        tracing::debug!("Token verification failed on {}: {:?}", req.path(), e);
        ApiError::from(e)
    })?;

    Ok(CurrentUser {
        user_id: claims.user_id,
        role: claims.role,
    })
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
