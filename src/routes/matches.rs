use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::MatchError;
use crate::models::{ErrorResponse, FindMatchesRequest};
use crate::routes::AppState;
use crate::services::AdoptionStore;

/// Configure match ranking routes
pub fn configure<S: AdoptionStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/matches/find", web::post().to(find_matches::<S>));
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "adopterId": 42,
///   "limit": 20
/// }
/// ```
async fn find_matches<S: AdoptionStore + 'static>(
    state: web::Data<AppState<S>>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation failed",
            errors.to_string(),
            400,
        ));
    }

    let adopter_id = req.adopter_id;
    let limit = state.matching.result_limit(req.limit);

    tracing::info!("Finding matches for adopter: {}, limit: {}", adopter_id, limit);

    match state
        .ranker
        .rank_matches(state.store.as_ref(), adopter_id, limit)
        .await
    {
        Ok(result) => {
            tracing::info!(
                "Returning {} matches for adopter {} (requires_preferences: {})",
                result.total,
                adopter_id,
                result.requires_preferences
            );
            HttpResponse::Ok().json(result)
        }
        Err(MatchError::AdopterNotFound(id)) => {
            tracing::info!("Adopter {} not found", id);
            HttpResponse::NotFound().json(ErrorResponse::new(
                "Adopter not found",
                format!("No adopter with id {}", id),
                404,
            ))
        }
        Err(e) => {
            tracing::error!("Failed to rank matches for {}: {}", adopter_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to rank matches",
                e.to_string(),
                500,
            ))
        }
    }
}
