#![allow(dead_code)]

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, Set};
use storefront_api::{
    db::create_pool,
    dto::{addresses::AddressRequest, auth::Claims},
    entity::products::{ActiveModel as ProductActive, Model as ProductModel},
    middleware::auth::AuthUser,
    services::address_service,
    state::AppState,
};
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret";

/// Connects to the test database, or returns `None` when none is configured.
pub async fn setup_state() -> anyhow::Result<Option<AppState>> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run database flow tests."
            );
            return Ok(None);
        }
    };

    let pool = create_pool(&database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(Some(AppState::new(pool, TEST_SECRET)))
}

/// A fresh caller. Every test works on its own user, so tests can share a database.
pub fn new_user() -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        role: "user".into(),
    }
}

pub async fn create_product(
    state: &AppState,
    price: i64,
    discounted_price: i64,
) -> anyhow::Result<ProductModel> {
    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        name: Set(format!("Test Widget {}", Uuid::new_v4())),
        description: Set(Some("A product for testing".into())),
        price: Set(price),
        discounted_price: Set(discounted_price),
        vendor_id: Set(None),
        category_id: Set(None),
        is_active: Set(true),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    Ok(product)
}

pub async fn create_address(state: &AppState, user: &AuthUser) -> anyhow::Result<Uuid> {
    let resp = address_service::create_address(
        state,
        user,
        AddressRequest {
            work_address: Some(false),
            address1: "12 Nile St".into(),
            address2: None,
            city_id: None,
            phone: "+20 100 000 0000".into(),
        },
    )
    .await?;
    Ok(resp.data.expect("address data").id)
}

pub fn bearer(sub: &str, role: &str) -> String {
    let claims = Claims {
        sub: sub.to_string(),
        role: role.to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("token");
    format!("Bearer {token}")
}

/// Failures that would reach the client as a 500.
pub fn is_internal(err: &storefront_api::error::AppError) -> bool {
    use storefront_api::error::AppError;
    matches!(err, AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_))
}
