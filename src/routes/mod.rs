// Route exports
pub mod ai;
pub mod auth;
pub mod problems;
pub mod session;
pub mod solutions;

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::core::Recommender;
use crate::models::HealthResponse;
use crate::services::{AuthService, CatalogCache, MarketplaceStore};

pub use session::CurrentUser;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MarketplaceStore>,
    pub catalog: Arc<CatalogCache>,
    pub auth: Arc<AuthService>,
    pub recommender: Recommender,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health_check))
            .service(web::scope("/auth").configure(auth::configure))
            .service(web::scope("/problems").configure(problems::configure))
            .service(web::scope("/solutions").configure(solutions::configure))
            .service(web::scope("/ai").configure(ai::configure)),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
