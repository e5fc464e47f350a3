use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::ItemLine;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: Uuid,
    pub qty: i32,
    pub size_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartList {
    pub items: Vec<ItemLine>,
    pub total: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemChange {
    pub id: Uuid,
    /// `None` once the line has been removed.
    pub quantity: Option<i32>,
    pub removed: bool,
}
