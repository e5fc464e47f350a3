use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    db::lock_user,
    dto::addresses::{AddressList, AddressRequest},
    entity::{
        addresses::{
            ActiveModel as AddressActive, Column as AddressCol, Entity as Addresses,
            Model as AddressModel,
        },
        cities::Entity as Cities,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_owner},
    models::Address,
    response::{ApiResponse, Meta},
    state::AppState,
};

const ADDRESS1_MAX_CHARS: usize = 255;
const ADDRESS2_MAX_CHARS: usize = 500;
const PHONE_MAX_CHARS: usize = 255;

pub async fn list_addresses(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<AddressList>> {
    let items: Vec<Address> = Addresses::find()
        .filter(AddressCol::UserId.eq(user.user_id))
        .order_by_asc(AddressCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(address_from_entity)
        .collect();

    if items.is_empty() {
        return Err(AppError::Empty("No addresses found"));
    }

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Addresses", AddressList { items }, Some(meta)))
}

pub async fn get_address(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Address>> {
    let address = find_owned(&state.orm, user, id).await?;
    Ok(ApiResponse::success("Address", address_from_entity(address), None))
}

pub async fn create_address(
    state: &AppState,
    user: &AuthUser,
    payload: AddressRequest,
) -> AppResult<ApiResponse<Address>> {
    let payload = validate_address(payload)?;

    let txn = state.orm.begin().await?;
    lock_user(&txn, user.user_id).await?;
    ensure_city(&txn, payload.city_id).await?;

    let address = AddressActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        work_address: Set(payload.work_address),
        address1: Set(payload.address1),
        address2: Set(payload.address2),
        city_id: Set(payload.city_id),
        phone: Set(payload.phone),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(user_id = %user.user_id, address_id = %address.id, "address created");
    Ok(ApiResponse::success(
        "Address created",
        address_from_entity(address),
        Some(Meta::empty()),
    ))
}

pub async fn update_address(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: AddressRequest,
) -> AppResult<ApiResponse<Address>> {
    let payload = validate_address(payload)?;

    let txn = state.orm.begin().await?;
    lock_user(&txn, user.user_id).await?;

    let existing = find_owned(&txn, user, id).await?;
    ensure_city(&txn, payload.city_id).await?;

    let mut active: AddressActive = existing.into();
    active.work_address = Set(payload.work_address);
    active.address1 = Set(payload.address1);
    active.address2 = Set(payload.address2);
    active.city_id = Set(payload.city_id);
    active.phone = Set(payload.phone);
    let address = active.update(&txn).await?;

    txn.commit().await?;

    Ok(ApiResponse::success(
        "Updated",
        address_from_entity(address),
        Some(Meta::empty()),
    ))
}

pub async fn delete_address(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    let txn = state.orm.begin().await?;
    lock_user(&txn, user.user_id).await?;

    let address = find_owned(&txn, user, id).await?;
    address.delete(&txn).await?;

    txn.commit().await?;

    tracing::info!(user_id = %user.user_id, address_id = %id, "address deleted");
    Ok(())
}

/// Missing addresses are `NotFound`; someone else's address is `Forbidden`.
async fn find_owned<C: ConnectionTrait>(
    conn: &C,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<AddressModel> {
    let address = Addresses::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound("address"))?;
    ensure_owner(user, address.user_id)?;
    Ok(address)
}

async fn ensure_city<C: ConnectionTrait>(conn: &C, city_id: Option<Uuid>) -> AppResult<()> {
    if let Some(city_id) = city_id {
        Cities::find_by_id(city_id)
            .one(conn)
            .await?
            .ok_or(AppError::NotFound("city"))?;
    }
    Ok(())
}

fn validate_address(mut payload: AddressRequest) -> AppResult<AddressRequest> {
    payload.address1 = required("address1", &payload.address1, ADDRESS1_MAX_CHARS)?;
    payload.phone = required("phone", &payload.phone, PHONE_MAX_CHARS)?;
    payload.address2 = payload
        .address2
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty());
    if let Some(line) = &payload.address2 {
        if line.chars().count() > ADDRESS2_MAX_CHARS {
            return Err(AppError::Validation(format!(
                "address2 must be at most {ADDRESS2_MAX_CHARS} characters"
            )));
        }
    }
    Ok(payload)
}

fn required(field: &str, value: &str, max_chars: usize) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} must not be blank")));
    }
    if value.chars().count() > max_chars {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(value.to_string())
}

fn address_from_entity(model: AddressModel) -> Address {
    Address {
        id: model.id,
        user_id: model.user_id,
        work_address: model.work_address,
        address1: model.address1,
        address2: model.address2,
        city_id: model.city_id,
        phone: model.phone,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> AddressRequest {
        AddressRequest {
            work_address: Some(false),
            address1: " 12 Nile St ".into(),
            address2: Some("   ".into()),
            city_id: None,
            phone: "+20 100 000 0000".into(),
        }
    }

    #[test]
    fn fields_are_trimmed_and_blank_optionals_dropped() {
        let payload = validate_address(request()).unwrap();
        assert_eq!(payload.address1, "12 Nile St");
        assert_eq!(payload.address2, None);
    }

    #[test]
    fn blank_phone_is_rejected() {
        let payload = AddressRequest {
            phone: " ".into(),
            ..request()
        };
        assert!(matches!(validate_address(payload), Err(AppError::Validation(_))));
    }

    #[test]
    fn oversized_second_line_is_rejected() {
        let payload = AddressRequest {
            address2: Some("x".repeat(ADDRESS2_MAX_CHARS + 1)),
            ..request()
        };
        assert!(matches!(validate_address(payload), Err(AppError::Validation(_))));
    }
}
