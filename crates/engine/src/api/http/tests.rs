use super::*;
use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use petpals_domain::{ActivityType, CooldownGate, ItemType};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::api::auth::USER_ID_HEADER;
use crate::infrastructure::clock::ManualClock;
use crate::infrastructure::config::{EngineConfig, StoreKind};
use crate::infrastructure::memory::{MemoryPetRepo, MemoryRepositories};
use crate::infrastructure::ports::PetRepo;

const BRUCE: i64 = 1;
const CLARK: i64 = 2;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 5, 10, 0, 0).unwrap()
}

struct TestApp {
    router: Router,
    clock: Arc<ManualClock>,
    pets: Arc<MemoryPetRepo>,
}

fn test_app() -> TestApp {
    let memory = MemoryRepositories::new();
    let pets = memory.pet.clone();
    let clock = Arc::new(ManualClock::new(start()));
    let config = EngineConfig {
        store: StoreKind::Memory,
        ..EngineConfig::default()
    };
    let app = App::new(memory.into(), clock.clone(), config);
    TestApp {
        router: routes().with_state(Arc::new(app)),
        clock,
        pets,
    }
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    user: Option<i64>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_ID_HEADER, user.to_string());
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Creates a hero and a pet for `user`, returning their ids.
async fn hero_with_pet(router: &Router, user: i64) -> (i64, i64) {
    let (status, hero) = send(
        router,
        "POST",
        "/api/heroes",
        Some(user),
        Some(json!({ "name": "Bruce Wayne", "alias": "Batman", "city": "Gotham" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let hero_id = hero["id"].as_i64().unwrap();

    let (status, pet) = send(
        router,
        "POST",
        "/api/pets",
        Some(user),
        Some(json!({
            "name": "Ace",
            "animal": "dog",
            "superpower": "detective nose",
            "heroId": hero_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    (hero_id, pet["id"].as_i64().unwrap())
}

#[tokio::test]
async fn health_is_public() {
    let t = test_app();
    let (status, _) = send(&t.router, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn users_register_once_per_email() {
    let t = test_app();
    let body = json!({ "email": "bruce@wayne.com" });

    let (status, user) = send(&t.router, "POST", "/api/users", None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["email"], "bruce@wayne.com");

    let (status, error) = send(&t.router, "POST", "/api/users", None, Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(error["error"].is_string());
}

#[tokio::test]
async fn feeding_a_new_pet_then_feeding_again_hits_the_cooldown() {
    let t = test_app();
    let (_, pet_id) = hero_with_pet(&t.router, BRUCE).await;
    let uri = format!("/api/pets/{pet_id}/activity");

    let (status, fed) = send(
        &t.router,
        "POST",
        &uri,
        Some(BRUCE),
        Some(json!({ "activity": "feed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fed["pet"]["happiness"], 90);
    assert_eq!(fed["pet"]["health"], 95);
    assert_eq!(fed["pet"]["hunger"], 2);
    assert_eq!(fed["pet"]["personality"], "happy");
    assert_eq!(fed["pet"]["activityHistory"].as_array().unwrap().len(), 1);

    t.clock.advance(Duration::milliseconds(1_000));
    let (status, error) = send(
        &t.router,
        "POST",
        &uri,
        Some(BRUCE),
        Some(json!({ "actividad": "alimentar" })),
    )
    .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(error["cooldown"], 4_000);

    t.clock.advance(Duration::milliseconds(4_000));
    let (status, _) = send(
        &t.router,
        "POST",
        &uri,
        Some(BRUCE),
        Some(json!({ "activity": "feed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn different_activities_do_not_share_a_cooldown() {
    let t = test_app();
    let (_, pet_id) = hero_with_pet(&t.router, BRUCE).await;
    let uri = format!("/api/pets/{pet_id}/activity");

    for activity in ["walk", "bathe", "play"] {
        let (status, _) = send(
            &t.router,
            "POST",
            &uri,
            Some(BRUCE),
            Some(json!({ "activity": activity })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{activity}");
    }
}

#[tokio::test]
async fn bad_activity_input_is_a_bad_request() {
    let t = test_app();
    let (_, pet_id) = hero_with_pet(&t.router, BRUCE).await;
    let uri = format!("/api/pets/{pet_id}/activity");

    let (status, _) = send(
        &t.router,
        "POST",
        &uri,
        Some(BRUCE),
        Some(json!({ "activity": "fly" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&t.router, "POST", &uri, Some(BRUCE), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn caller_identity_and_ownership_are_enforced() {
    let t = test_app();
    let (_, pet_id) = hero_with_pet(&t.router, BRUCE).await;
    let uri = format!("/api/pets/{pet_id}/status");

    let (status, _) = send(&t.router, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&t.router, "GET", &uri, Some(CLARK), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&t.router, "GET", "/api/pets/999/status", Some(BRUCE), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, pets) = send(&t.router, "GET", "/api/pets", Some(CLARK), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pets, json!([]));
}

#[tokio::test]
async fn status_reads_compound_the_disease_penalty_until_cured() {
    let t = test_app();
    let (_, pet_id) = hero_with_pet(&t.router, BRUCE).await;

    let (status, sick) = send(
        &t.router,
        "POST",
        &format!("/api/pets/{pet_id}/sick"),
        Some(BRUCE),
        Some(json!({ "enfermedad": "Flu" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sick["diseases"], json!(["flu"]));
    assert_eq!(sick["personality"], "sad");

    let status_uri = format!("/api/pets/{pet_id}/status");
    let (_, first) = send(&t.router, "GET", &status_uri, Some(BRUCE), None).await;
    let (_, second) = send(&t.router, "GET", &status_uri, Some(BRUCE), None).await;
    assert_eq!((first["health"].clone(), first["happiness"].clone()), (json!(90), json!(80)));
    assert_eq!((second["health"].clone(), second["happiness"].clone()), (json!(80), json!(60)));

    let (status, cured) = send(
        &t.router,
        "POST",
        &format!("/api/pets/{pet_id}/cure"),
        Some(BRUCE),
        Some(json!({ "disease": "flu" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cured["diseases"], json!([]));

    let (_, after) = send(&t.router, "GET", &status_uri, Some(BRUCE), None).await;
    assert_eq!(after["health"], 80);
}

#[tokio::test]
async fn items_are_recorded_in_order() {
    let t = test_app();
    let (_, pet_id) = hero_with_pet(&t.router, BRUCE).await;
    let uri = format!("/api/pets/{pet_id}/item");

    let (status, used) = send(
        &t.router,
        "POST",
        &uri,
        Some(BRUCE),
        Some(json!({ "itemType": "water" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(used["pet"]["items"][0]["item"], "water");

    let (status, _) = send(
        &t.router,
        "POST",
        &uri,
        Some(BRUCE),
        Some(json!({ "item": "sombrero_magico" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &t.router,
        "POST",
        &uri,
        Some(BRUCE),
        Some(json!({ "itemType": "kryptonite" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, listed) = send(
        &t.router,
        "GET",
        &format!("/api/pets/{pet_id}/items"),
        Some(BRUCE),
        None,
    )
    .await;
    let names: Vec<_> = listed["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["item"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["water", "magic_hat"]);
}

#[tokio::test]
async fn personality_override_keeps_any_label() {
    let t = test_app();
    let (_, pet_id) = hero_with_pet(&t.router, BRUCE).await;

    let (status, pet) = send(
        &t.router,
        "PATCH",
        &format!("/api/pets/{pet_id}/personality"),
        Some(BRUCE),
        Some(json!({ "personality": "playful" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(pet["personality"], "playful");
}

#[tokio::test]
async fn profile_updates_merge() {
    let t = test_app();
    let (hero_id, pet_id) = hero_with_pet(&t.router, BRUCE).await;

    let (status, pet) = send(
        &t.router,
        "PUT",
        &format!("/api/pets/{pet_id}"),
        Some(BRUCE),
        Some(json!({ "name": "Titus" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pet["name"], "Titus");
    assert_eq!(pet["animal"], "dog");

    let (status, hero) = send(
        &t.router,
        "PUT",
        &format!("/api/heroes/{hero_id}"),
        Some(BRUCE),
        Some(json!({ "team": "Justice League" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hero["alias"], "Batman");
    assert_eq!(hero["team"], "Justice League");

    let (_, found) = send(&t.router, "GET", "/api/heroes/city/GOTHAM", Some(BRUCE), None).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn a_pet_is_adopted_once_and_then_cannot_be_deleted() {
    let t = test_app();
    let (hero_id, pet_id) = hero_with_pet(&t.router, BRUCE).await;
    let adopt = json!({ "heroId": hero_id, "petId": pet_id });

    let (status, _) = send(&t.router, "POST", "/api/adoptions", Some(CLARK), Some(adopt.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &t.router,
        "POST",
        "/api/adoptions",
        Some(BRUCE),
        Some(json!({ "heroId": 99, "petId": pet_id })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, adoption) =
        send(&t.router, "POST", "/api/adoptions", Some(BRUCE), Some(adopt.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(adoption["heroName"], "Bruce Wayne");
    assert_eq!(adoption["petName"], "Ace");

    let (status, _) = send(&t.router, "POST", "/api/adoptions", Some(BRUCE), Some(adopt)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&t.router, "DELETE", &format!("/api/pets/{pet_id}"), Some(BRUCE), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) =
        send(&t.router, "DELETE", &format!("/api/heroes/{hero_id}"), Some(BRUCE), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, mine) = send(&t.router, "GET", "/api/adoptions", Some(BRUCE), None).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
    let (status, by_pet) = send(
        &t.router,
        "GET",
        &format!("/api/pets/{pet_id}/adoption"),
        Some(BRUCE),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_pet["heroId"], hero_id);
    let (_, by_hero) = send(
        &t.router,
        "GET",
        &format!("/api/heroes/{hero_id}/adoptions"),
        Some(BRUCE),
        None,
    )
    .await;
    assert_eq!(by_hero.as_array().unwrap().len(), 1);
}

async fn create_hero(router: &Router, user: i64, name: &str, alias: &str) -> i64 {
    let (status, hero) = send(
        router,
        "POST",
        "/api/heroes",
        Some(user),
        Some(json!({ "name": name, "alias": alias })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    hero["id"].as_i64().unwrap()
}

#[tokio::test]
async fn another_users_pet_cannot_be_adopted() {
    let t = test_app();
    let (bruce_hero, bruce_pet) = hero_with_pet(&t.router, BRUCE).await;
    let clark_hero = create_hero(&t.router, CLARK, "Clark Kent", "Superman").await;

    let (status, _) = send(
        &t.router,
        "POST",
        "/api/adoptions",
        Some(CLARK),
        Some(json!({ "heroId": clark_hero, "petId": bruce_pet })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &t.router,
        "POST",
        &format!("/api/pets/{bruce_pet}/activity"),
        Some(CLARK),
        Some(json!({ "activity": "play" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, pet) = send(&t.router, "GET", &format!("/api/pets/{bruce_pet}"), Some(BRUCE), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pet["ownerHeroId"], bruce_hero);
}

#[tokio::test]
async fn a_hero_that_still_owns_a_pet_cannot_be_deleted() {
    let t = test_app();
    let (bruce_hero, bruce_pet) = hero_with_pet(&t.router, BRUCE).await;

    let (status, _) =
        send(&t.router, "DELETE", &format!("/api/heroes/{bruce_hero}"), Some(BRUCE), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // The hero keeps its id, so a new hero cannot pick it up along with the pet.
    let clark_hero = create_hero(&t.router, CLARK, "Clark Kent", "Superman").await;
    assert_ne!(clark_hero, bruce_hero);

    let (status, _) = send(
        &t.router,
        "POST",
        &format!("/api/pets/{bruce_pet}/activity"),
        Some(CLARK),
        Some(json!({ "activity": "play" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, pet) = send(&t.router, "GET", &format!("/api/pets/{bruce_pet}"), Some(BRUCE), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pet["ownerHeroId"], bruce_hero);
}

#[tokio::test]
async fn unadopted_pet_and_hero_can_be_deleted() {
    let t = test_app();
    let (hero_id, pet_id) = hero_with_pet(&t.router, BRUCE).await;

    let (status, _) = send(&t.router, "DELETE", &format!("/api/pets/{pet_id}"), Some(BRUCE), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) =
        send(&t.router, "DELETE", &format!("/api/heroes/{hero_id}"), Some(BRUCE), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&t.router, "GET", &format!("/api/pets/{pet_id}"), Some(BRUCE), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Two requests that read the same pet before either saves: the later save wins and
/// the earlier change is lost. Known and accepted; there is no per-pet lock.
#[tokio::test]
async fn interleaved_updates_lose_the_earlier_write() {
    let t = test_app();
    let (_, pet_id) = hero_with_pet(&t.router, BRUCE).await;
    let id = petpals_domain::PetId::new(pet_id);

    let read_by_walk = t.pets.get(id).await.unwrap().unwrap();
    let read_by_item = t.pets.get(id).await.unwrap().unwrap();

    let mut walked = read_by_walk;
    walked
        .perform_activity(ActivityType::Walk, &CooldownGate::default(), start())
        .unwrap();
    t.pets.save(&walked).await.unwrap();

    let mut watered = read_by_item;
    watered.use_item(ItemType::Water, start());
    t.pets.save(&watered).await.unwrap();

    let (_, pet) = send(&t.router, "GET", &format!("/api/pets/{pet_id}"), Some(BRUCE), None).await;
    assert_eq!(pet["items"].as_array().unwrap().len(), 1);
    assert_eq!(pet["activityHistory"], json!([]));
    assert_eq!(pet["lastActivity"], json!({}));
}
