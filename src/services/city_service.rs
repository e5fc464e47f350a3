use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    dto::cities::{CityList, CityRequest},
    entity::cities::{
        ActiveModel as CityActive, Column as CityCol, Entity as Cities, Model as CityModel,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::City,
    response::{ApiResponse, Meta},
    state::AppState,
};

const CITY_NAME_MAX_CHARS: usize = 255;

pub async fn list_cities(state: &AppState) -> AppResult<ApiResponse<CityList>> {
    let items: Vec<City> = Cities::find()
        .order_by_asc(CityCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(city_from_entity)
        .collect();

    if items.is_empty() {
        return Err(AppError::Empty("No cities found"));
    }

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Cities", CityList { items }, Some(meta)))
}

pub async fn get_city(state: &AppState, id: Uuid) -> AppResult<ApiResponse<City>> {
    let city = Cities::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("city"))?;
    Ok(ApiResponse::success("City", city_from_entity(city), None))
}

pub async fn create_city(
    state: &AppState,
    user: &AuthUser,
    payload: CityRequest,
) -> AppResult<ApiResponse<City>> {
    ensure_admin(user)?;
    let name = validate_city_name(&payload.name)?;

    let city = CityActive {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(city_id = %city.id, "city created");
    Ok(ApiResponse::success(
        "City created",
        city_from_entity(city),
        Some(Meta::empty()),
    ))
}

pub async fn update_city(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: CityRequest,
) -> AppResult<ApiResponse<City>> {
    ensure_admin(user)?;
    let name = validate_city_name(&payload.name)?;

    let existing = Cities::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("city"))?;

    let mut active: CityActive = existing.into();
    active.name = Set(name);
    let city = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Updated",
        city_from_entity(city),
        Some(Meta::empty()),
    ))
}

pub async fn delete_city(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    ensure_admin(user)?;
    let result = Cities::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("city"));
    }

    tracing::info!(city_id = %id, "city deleted");
    Ok(())
}

fn validate_city_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name must not be blank".into()));
    }
    if name.chars().count() > CITY_NAME_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "name must be at most {CITY_NAME_MAX_CHARS} characters"
        )));
    }
    Ok(name.to_string())
}

fn city_from_entity(model: CityModel) -> City {
    City {
        id: model.id,
        name: model.name,
    }
}
