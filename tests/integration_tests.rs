// Integration tests for Paw-tner Match

use actix_web::{http::StatusCode, test, web, App};
use pawtner_match::config::MatchingSettings;
use pawtner_match::core::{DuplicateScreener, MatchRanker};
use pawtner_match::models::{
    ActivityLevel, AdopterPreferenceProfile, AdoptionStatus, AnimalRecord, AnimalSize,
    CandidateListingAttributes, ExistingListing, Species,
};
use pawtner_match::routes::{self, AppState};
use pawtner_match::services::InMemoryStore;
use serde_json::{json, Value};
use std::sync::Arc;

fn create_animal(
    id: i32,
    name: &str,
    species: Species,
    age_years: Option<i32>,
    activity_level: Option<ActivityLevel>,
    size: AnimalSize,
    good_with_kids: Option<bool>,
    adoption_fee: Option<f64>,
) -> AnimalRecord {
    AnimalRecord {
        id,
        name: name.to_string(),
        species,
        breed: None,
        age_years,
        activity_level,
        size,
        good_with_kids,
        adoption_fee,
        adoption_status: AdoptionStatus::Available,
        shelter_id: 1,
    }
}

fn buddy() -> CandidateListingAttributes {
    CandidateListingAttributes {
        name: Some("Buddy".to_string()),
        breed: Some("Labrador".to_string()),
        age_years: Some(2),
        age_months: Some(0),
        size: Some(AnimalSize::Medium),
        color: Some("brown".to_string()),
        gender: Some("male".to_string()),
    }
}

fn create_store() -> InMemoryStore {
    let mut adopted = create_animal(
        6,
        "Max",
        Species::Dog,
        Some(2),
        Some(ActivityLevel::High),
        AnimalSize::Large,
        Some(true),
        Some(100.0),
    );
    adopted.adoption_status = AdoptionStatus::Adopted;

    let whiskers = CandidateListingAttributes {
        name: Some("Whiskers".to_string()),
        breed: Some("Siamese".to_string()),
        age_years: Some(8),
        age_months: None,
        size: Some(AnimalSize::Small),
        color: Some("white".to_string()),
        gender: Some("female".to_string()),
    };

    let mut store = InMemoryStore::new()
        .with_profile(AdopterPreferenceProfile {
            adopter_id: 1,
            preferred_species: Some(Species::Dog),
            preferred_age_min: Some(1),
            preferred_age_max: Some(5),
            preferred_activity_level: Some(ActivityLevel::High),
            has_children: Some(true),
            preferred_size: Some(AnimalSize::Large),
            max_fee: Some(200.0),
            basic_preferences_complete: true,
        })
        .with_profile(AdopterPreferenceProfile {
            adopter_id: 2,
            preferred_species: Some(Species::Cat),
            basic_preferences_complete: false,
            ..Default::default()
        })
        // 50 + 25 + 20 + 15 + 15 + 10 + 5, clamped to 100
        .with_animal(create_animal(
            1,
            "Rex",
            Species::Dog,
            Some(3),
            Some(ActivityLevel::High),
            AnimalSize::Large,
            Some(true),
            Some(100.0),
        ))
        // Species mismatch
        .with_animal(create_animal(
            2,
            "Mittens",
            Species::Cat,
            Some(3),
            Some(ActivityLevel::High),
            AnimalSize::Large,
            Some(true),
            Some(100.0),
        ))
        // 50 + 25 - 10 - 25 - 15 = 25, below threshold
        .with_animal(create_animal(
            3,
            "Bruno",
            Species::Dog,
            Some(9),
            Some(ActivityLevel::Low),
            AnimalSize::Medium,
            Some(false),
            Some(300.0),
        ))
        // 50 + 25 + 15 + 15 + 10 + 5, clamped to 100
        .with_animal(create_animal(
            4,
            "Daisy",
            Species::Dog,
            Some(4),
            Some(ActivityLevel::Moderate),
            AnimalSize::Large,
            Some(true),
            Some(150.0),
        ))
        // 50 + 25 + 20 - 25 = 70
        .with_animal(create_animal(
            5,
            "Scout",
            Species::Dog,
            None,
            Some(ActivityLevel::High),
            AnimalSize::Small,
            None,
            None,
        ))
        .with_animal(adopted)
        .with_listing(8, AdoptionStatus::Available, ExistingListing { id: 20, attributes: buddy() })
        .with_listing(9, AdoptionStatus::Available, ExistingListing { id: 30, attributes: whiskers })
        .with_listing(9, AdoptionStatus::Adopted, ExistingListing { id: 31, attributes: buddy() });

    for id in 10..13 {
        store = store.with_listing(7, AdoptionStatus::Available, ExistingListing { id, attributes: buddy() });
    }

    store
}

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState {
                    store: Arc::new(create_store()),
                    ranker: MatchRanker::default(),
                    screener: DuplicateScreener::default(),
                    matching: MatchingSettings::default(),
                }))
                .configure(routes::configure_routes::<InMemoryStore>),
        )
        .await
    };
}

fn screen_body(organization_id: i32, override_duplicate: bool) -> Value {
    json!({
        "organizationId": organization_id,
        "overrideDuplicate": override_duplicate,
        "listing": {
            "name": "Buddy",
            "breed": "Labrador",
            "ageYears": 2,
            "ageMonths": 0,
            "size": "medium",
            "color": "brown",
            "gender": "male"
        }
    })
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = test_app!();
    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_find_matches_end_to_end() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(json!({ "adopterId": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["requiresPreferences"], false);

    let matches = body["matches"].as_array().unwrap();
    let ids: Vec<i64> = matches
        .iter()
        .map(|m| m["animal"]["id"].as_i64().unwrap())
        .collect();
    // Equal scores fall back to id order
    assert_eq!(ids, vec![1, 4, 5]);

    let scores: Vec<f64> = matches
        .iter()
        .map(|m| m["compatibilityScore"].as_f64().unwrap())
        .collect();
    assert_eq!(scores, vec![100.0, 100.0, 70.0]);
}

#[actix_web::test]
async fn test_find_matches_with_limit() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(json!({ "adopterId": 1, "limit": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["matches"][0]["animal"]["name"], "Rex");
}

#[actix_web::test]
async fn test_find_matches_incomplete_preferences() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(json!({ "adopterId": 2 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["requiresPreferences"], true);
    assert_eq!(body["total"], 0);
    assert!(body["message"].is_string());
}

#[actix_web::test]
async fn test_find_matches_unknown_adopter() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(json!({ "adopterId": 99 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_find_matches_rejects_invalid_request() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(json!({ "adopterId": 1, "limit": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_screen_unique_listing_allowed() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/listings/screen")
        .set_json(screen_body(9, false))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["allowed"], true);
    // The adopted copy of Buddy is not an active listing
    assert_eq!(body["screening"]["isDuplicate"], false);
    assert_eq!(body["screening"]["maxSimilarity"], 0.0);
}

#[actix_web::test]
async fn test_screen_duplicate_warns() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/listings/screen")
        .set_json(screen_body(8, false))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["type"], "duplicate_warning");
    assert_eq!(body["details"]["isDuplicate"], true);
    assert_eq!(body["details"]["similarListings"][0]["id"], 20);
    assert_eq!(body["details"]["similarListings"][0]["similarityScore"], 100.0);
    assert_eq!(
        body["details"]["similarListings"][0]["ageDisplay"],
        "2 years, 0 months"
    );
}

#[actix_web::test]
async fn test_screen_duplicate_override_allowed() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/listings/screen")
        .set_json(screen_body(8, true))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["allowed"], true);
    assert_eq!(body["screening"]["isDuplicate"], true);
}

#[actix_web::test]
async fn test_screen_similarity_limit_blocks_even_with_override() {
    let app = test_app!();

    for override_duplicate in [false, true] {
        let req = test::TestRequest::post()
            .uri("/api/v1/listings/screen")
            .set_json(screen_body(7, override_duplicate))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["type"], "similarity_limit_exceeded");
        assert_eq!(body["details"]["highSimilarityCount"], 3);
        assert_eq!(body["details"]["limitExceeded"], true);
        assert_eq!(body["details"]["similarityLimit"], 3);
    }
}

#[actix_web::test]
async fn test_screen_rejects_invalid_listing() {
    let app = test_app!();
    let mut body = screen_body(9, false);
    body["listing"]["name"] = json!("");

    let req = test::TestRequest::post()
        .uri("/api/v1/listings/screen")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_coordinators_share_one_store() {
    let store = create_store();

    let ranked = MatchRanker::default()
        .rank_matches(&store, 1, 20)
        .await
        .unwrap();
    assert_eq!(ranked.total, 3);

    let screening = DuplicateScreener::default()
        .screen_for_duplicates(&store, 7, &buddy())
        .await
        .unwrap();
    assert!(screening.limit_exceeded);
    assert_eq!(screening.similar_listings.len(), 3);
}
