//! HTTP routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use petpals_domain::{HeroId, PetId};
use petpals_shared::{
    ActivityRequest, ActivityResponse, AdoptRequest, AdoptionResponse, CreateHeroRequest,
    CreatePetRequest, DiseaseRequest, HeroResponse, ItemsResponse, PersonalityRequest,
    PetResponse, RegisterUserRequest, UpdateHeroRequest, UpdatePetRequest, UseItemRequest,
    UseItemResponse, UserResponse,
};

use super::auth::Caller;
use super::convert::{adoption_response, hero_response, item_response, pet_response, user_response};
use super::error::ApiError;
use crate::app::App;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/users", post(register_user))
        // Heroes
        .route("/api/heroes", get(list_heroes).post(create_hero))
        .route(
            "/api/heroes/{id}",
            get(get_hero).put(update_hero).delete(delete_hero),
        )
        .route("/api/heroes/city/{city}", get(heroes_by_city))
        .route("/api/heroes/{id}/adoptions", get(adoptions_by_hero))
        // Pets
        .route("/api/pets", get(list_pets).post(create_pet))
        .route(
            "/api/pets/{id}",
            get(get_pet).put(update_pet).delete(delete_pet),
        )
        .route("/api/pets/{id}/status", get(pet_status))
        .route("/api/pets/{id}/activity", post(perform_activity))
        .route("/api/pets/{id}/item", post(use_item))
        .route("/api/pets/{id}/items", get(list_items))
        .route("/api/pets/{id}/sick", post(mark_sick))
        .route("/api/pets/{id}/cure", post(cure))
        .route(
            "/api/pets/{id}/personality",
            axum::routing::patch(override_personality),
        )
        .route("/api/pets/{id}/adoption", get(adoption_by_pet))
        // Adoptions
        .route("/api/adoptions", get(list_adoptions).post(adopt))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Users
// =============================================================================

async fn register_user(
    State(app): State<Arc<App>>,
    Json(body): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = app.use_cases.management.user.register(body.email).await?;
    Ok((StatusCode::CREATED, Json(user_response(&user))))
}

// =============================================================================
// Heroes
// =============================================================================

async fn list_heroes(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
) -> Result<Json<Vec<HeroResponse>>, ApiError> {
    let heroes = app.use_cases.management.hero.list(caller).await?;
    Ok(Json(heroes.iter().map(hero_response).collect()))
}

async fn create_hero(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    Json(body): Json<CreateHeroRequest>,
) -> Result<(StatusCode, Json<HeroResponse>), ApiError> {
    let hero = app.use_cases.management.hero.create(caller, body).await?;
    Ok((StatusCode::CREATED, Json(hero_response(&hero))))
}

async fn get_hero(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    Path(id): Path<i64>,
) -> Result<Json<HeroResponse>, ApiError> {
    let hero = app
        .use_cases
        .management
        .hero
        .get(caller, HeroId::new(id))
        .await?;
    Ok(Json(hero_response(&hero)))
}

async fn update_hero(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    Path(id): Path<i64>,
    Json(body): Json<UpdateHeroRequest>,
) -> Result<Json<HeroResponse>, ApiError> {
    let hero = app
        .use_cases
        .management
        .hero
        .update(caller, HeroId::new(id), body)
        .await?;
    Ok(Json(hero_response(&hero)))
}

async fn delete_hero(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .management
        .hero
        .delete(caller, HeroId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn heroes_by_city(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    Path(city): Path<String>,
) -> Result<Json<Vec<HeroResponse>>, ApiError> {
    let heroes = app
        .use_cases
        .management
        .hero
        .find_by_city(caller, &city)
        .await?;
    Ok(Json(heroes.iter().map(hero_response).collect()))
}

// =============================================================================
// Pets
// =============================================================================

async fn list_pets(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
) -> Result<Json<Vec<PetResponse>>, ApiError> {
    let pets = app.use_cases.management.pet.list(caller).await?;
    Ok(Json(pets.iter().map(pet_response).collect()))
}

async fn create_pet(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    Json(body): Json<CreatePetRequest>,
) -> Result<(StatusCode, Json<PetResponse>), ApiError> {
    let pet = app.use_cases.management.pet.create(caller, body).await?;
    Ok((StatusCode::CREATED, Json(pet_response(&pet))))
}

async fn get_pet(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    Path(id): Path<i64>,
) -> Result<Json<PetResponse>, ApiError> {
    let pet = app
        .use_cases
        .management
        .pet
        .get(caller, PetId::new(id))
        .await?;
    Ok(Json(pet_response(&pet)))
}

async fn update_pet(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    Path(id): Path<i64>,
    Json(body): Json<UpdatePetRequest>,
) -> Result<Json<PetResponse>, ApiError> {
    let pet = app
        .use_cases
        .management
        .pet
        .update(caller, PetId::new(id), body)
        .await?;
    Ok(Json(pet_response(&pet)))
}

async fn delete_pet(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .management
        .pet
        .delete(caller, PetId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn pet_status(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    Path(id): Path<i64>,
) -> Result<Json<PetResponse>, ApiError> {
    let pet = app
        .use_cases
        .pet_care
        .status(caller, PetId::new(id))
        .await?;
    Ok(Json(pet_response(&pet)))
}

async fn perform_activity(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    Path(id): Path<i64>,
    Json(body): Json<ActivityRequest>,
) -> Result<Json<ActivityResponse>, ApiError> {
    let done = app
        .use_cases
        .pet_care
        .perform_activity(caller, PetId::new(id), &body.activity)
        .await?;
    Ok(Json(ActivityResponse {
        pet: pet_response(&done.pet),
        effect: done.report.record.effect.clone(),
        contracted: done
            .report
            .contracted
            .iter()
            .map(ToString::to_string)
            .collect(),
    }))
}

async fn use_item(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    Path(id): Path<i64>,
    Json(body): Json<UseItemRequest>,
) -> Result<Json<UseItemResponse>, ApiError> {
    let pet = app
        .use_cases
        .pet_care
        .use_item(caller, PetId::new(id), &body.item_type)
        .await?;
    Ok(Json(UseItemResponse {
        pet: pet_response(&pet),
    }))
}

async fn list_items(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    Path(id): Path<i64>,
) -> Result<Json<ItemsResponse>, ApiError> {
    let items = app
        .use_cases
        .pet_care
        .items(caller, PetId::new(id))
        .await?;
    Ok(Json(ItemsResponse {
        items: items.iter().map(item_response).collect(),
    }))
}

async fn mark_sick(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    Path(id): Path<i64>,
    Json(body): Json<DiseaseRequest>,
) -> Result<Json<PetResponse>, ApiError> {
    let pet = app
        .use_cases
        .pet_care
        .mark_sick(caller, PetId::new(id), &body.disease)
        .await?;
    Ok(Json(pet_response(&pet)))
}

async fn cure(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    Path(id): Path<i64>,
    Json(body): Json<DiseaseRequest>,
) -> Result<Json<PetResponse>, ApiError> {
    let pet = app
        .use_cases
        .pet_care
        .cure(caller, PetId::new(id), &body.disease)
        .await?;
    Ok(Json(pet_response(&pet)))
}

async fn override_personality(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    Path(id): Path<i64>,
    Json(body): Json<PersonalityRequest>,
) -> Result<Json<PetResponse>, ApiError> {
    let pet = app
        .use_cases
        .pet_care
        .override_personality(caller, PetId::new(id), &body.personality)
        .await?;
    Ok(Json(pet_response(&pet)))
}

// =============================================================================
// Adoptions
// =============================================================================

async fn list_adoptions(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
) -> Result<Json<Vec<AdoptionResponse>>, ApiError> {
    let adoptions = app.use_cases.adoption.list(caller).await?;
    Ok(Json(adoptions.iter().map(adoption_response).collect()))
}

async fn adopt(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    Json(body): Json<AdoptRequest>,
) -> Result<(StatusCode, Json<AdoptionResponse>), ApiError> {
    let view = app
        .use_cases
        .adoption
        .adopt(caller, HeroId::new(body.hero_id), PetId::new(body.pet_id))
        .await?;
    Ok((StatusCode::CREATED, Json(adoption_response(&view))))
}

async fn adoptions_by_hero(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    Path(id): Path<i64>,
) -> Result<Json<Vec<AdoptionResponse>>, ApiError> {
    let adoptions = app
        .use_cases
        .adoption
        .by_hero(caller, HeroId::new(id))
        .await?;
    Ok(Json(adoptions.iter().map(adoption_response).collect()))
}

async fn adoption_by_pet(
    State(app): State<Arc<App>>,
    Caller(caller): Caller,
    Path(id): Path<i64>,
) -> Result<Json<AdoptionResponse>, ApiError> {
    let view = app
        .use_cases
        .adoption
        .by_pet(caller, PetId::new(id))
        .await?;
    Ok(Json(adoption_response(&view)))
}

#[cfg(test)]
mod tests;
