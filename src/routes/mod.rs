// Route exports
pub mod listings;
pub mod matches;

use actix_web::{web, HttpResponse, Responder};

use crate::config::MatchingSettings;
use crate::core::{DuplicateScreener, MatchRanker};
use crate::models::HealthResponse;
use crate::services::AdoptionStore;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState<S> {
    pub store: Arc<S>,
    pub ranker: MatchRanker,
    pub screener: DuplicateScreener,
    pub matching: MatchingSettings,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            ranker: self.ranker.clone(),
            screener: self.screener.clone(),
            matching: self.matching.clone(),
        }
    }
}

pub fn configure_routes<S: AdoptionStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check::<S>))
            .configure(matches::configure::<S>)
            .configure(listings::configure::<S>),
    );
}

/// Health check endpoint
async fn health_check<S: AdoptionStore + 'static>(state: web::Data<AppState<S>>) -> impl Responder {
    let status = if state.store.health_check().await {
        "healthy"
    } else {
        "degraded"
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
