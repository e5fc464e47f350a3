use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::OrderStatusTitle;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub discounted_price: i64,
    pub vendor_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Vendor {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct City {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Address {
    pub id: Uuid,
    pub user_id: Uuid,
    pub work_address: Option<bool>,
    pub address1: String,
    pub address2: Option<String>,
    pub city_id: Option<Uuid>,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub size_id: Option<Uuid>,
    pub ordered: bool,
    pub created_at: DateTime<Utc>,
}

/// An item together with its product, as shown in a cart or an order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemLine {
    pub id: Uuid,
    pub product: Product,
    pub quantity: i32,
    pub size_id: Option<Uuid>,
    pub ordered: bool,
    pub line_total: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address_id: Option<Uuid>,
    pub status: OrderStatusTitle,
    pub note: Option<String>,
    pub ref_code: String,
    pub total: i64,
    pub ordered: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
