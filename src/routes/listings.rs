use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    CandidateListingAttributes, ErrorResponse, ScreenListingRequest, ScreenListingResponse,
    ScreeningDecision,
};
use crate::routes::AppState;
use crate::services::AdoptionStore;

/// Configure listing screening routes
pub fn configure<S: AdoptionStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/listings/screen", web::post().to(screen_listing::<S>));
}

/// Screen a new listing for duplicates
///
/// POST /api/v1/listings/screen
///
/// Request body:
/// ```json
/// {
///   "organizationId": 3,
///   "overrideDuplicate": false,
///   "listing": {
///     "name": "Buddy",
///     "breed": "Labrador",
///     "ageYears": 2,
///     "ageMonths": 0,
///     "size": "medium",
///     "color": "brown",
///     "gender": "male"
///   }
/// }
/// ```
///
/// 200 when the listing may be created, 409 when similar listings exist and
/// the duplicate was not overridden, 403 when the similarity limit is reached.
async fn screen_listing<S: AdoptionStore + 'static>(
    state: web::Data<AppState<S>>,
    req: web::Json<ScreenListingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for screen_listing request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation failed",
            errors.to_string(),
            400,
        ));
    }

    let ScreenListingRequest {
        organization_id,
        override_duplicate,
        listing,
    } = req.into_inner();
    let candidate = CandidateListingAttributes::from(listing);

    let screening = match state
        .screener
        .screen_for_duplicates(state.store.as_ref(), organization_id, &candidate)
        .await
    {
        Ok(screening) => screening,
        Err(e) => {
            tracing::error!(
                "Failed to screen listing for organization {}: {}",
                organization_id,
                e
            );
            return HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to screen listing",
                e.to_string(),
                500,
            ));
        }
    };

    match screening.decision(override_duplicate) {
        ScreeningDecision::Block => {
            tracing::warn!(
                "Blocked listing for organization {}: {} highly similar listings",
                organization_id,
                screening.high_similarity_count
            );
            HttpResponse::Forbidden().json(ErrorResponse {
                error: "Similarity limit exceeded".to_string(),
                message: format!(
                    "You already have {} listings that are at least {}% similar to this one. \
                     Please review your existing listings before adding another.",
                    screening.high_similarity_count,
                    state.screener.config().high_similarity_threshold
                ),
                status_code: 403,
                error_type: Some("similarity_limit_exceeded".to_string()),
                details: Some(screening),
            })
        }
        ScreeningDecision::Warn => {
            tracing::warn!(
                "Possible duplicate listing for organization {}: {} similar (max {:.1})",
                organization_id,
                screening.similar_listings.len(),
                screening.max_similarity
            );
            HttpResponse::Conflict().json(ErrorResponse {
                error: "Possible duplicate".to_string(),
                message: "Similar listings found. Review them or resubmit with overrideDuplicate."
                    .to_string(),
                status_code: 409,
                error_type: Some("duplicate_warning".to_string()),
                details: Some(screening),
            })
        }
        ScreeningDecision::Allow => HttpResponse::Ok().json(ScreenListingResponse {
            allowed: true,
            screening,
        }),
    }
}
