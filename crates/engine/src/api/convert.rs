//! Domain to wire conversions.

use chrono::{DateTime, SecondsFormat, Utc};
use petpals_domain::{ActivityType, Hero, ItemRecord, Pet, User};
use petpals_shared::{AdoptionResponse, HeroResponse, ItemUseResponse, PetResponse, UserResponse};

use crate::use_cases::AdoptionView;

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id().value(),
        email: user.email().to_string(),
        created_at: timestamp(user.created_at()),
    }
}

pub fn hero_response(hero: &Hero) -> HeroResponse {
    HeroResponse {
        id: hero.id().value(),
        owner_user_id: hero.owner_user_id().value(),
        name: hero.name().to_string(),
        alias: hero.alias().to_string(),
        city: hero.city().map(str::to_string),
        team: hero.team().map(str::to_string),
        created_at: timestamp(hero.created_at()),
    }
}

pub fn item_response(record: &ItemRecord) -> ItemUseResponse {
    ItemUseResponse {
        item: record.item.to_string(),
        used_at: timestamp(record.used_at),
    }
}

pub fn pet_response(pet: &Pet) -> PetResponse {
    let last_activity = ActivityType::all()
        .into_iter()
        .filter_map(|activity| {
            pet.last_activity_timestamps()
                .get(activity)
                .map(|at| (activity.to_string(), timestamp(at)))
        })
        .collect();

    PetResponse {
        id: pet.id().value(),
        name: pet.name().to_string(),
        animal: pet.animal().to_string(),
        superpower: pet.superpower().to_string(),
        owner_hero_id: pet.owner_hero_id().map(|id| id.value()),
        happiness: pet.happiness().get(),
        health: pet.health().get(),
        hunger: pet.hunger().get(),
        personality: pet.personality().to_string(),
        diseases: pet.diseases().iter().map(ToString::to_string).collect(),
        items: pet.items().iter().map(item_response).collect(),
        activity_history: pet
            .activity_history()
            .records()
            .iter()
            .map(ToString::to_string)
            .collect(),
        last_interaction: timestamp(pet.last_interaction()),
        last_activity,
        created_at: timestamp(pet.created_at()),
    }
}

pub fn adoption_response(view: &AdoptionView) -> AdoptionResponse {
    AdoptionResponse {
        id: view.adoption.id().value(),
        hero_id: view.adoption.hero_id().value(),
        pet_id: view.adoption.pet_id().value(),
        adopted_at: timestamp(view.adoption.adopted_at()),
        hero_name: view.hero_name.clone(),
        pet_name: view.pet_name.clone(),
    }
}
