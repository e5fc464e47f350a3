use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Address;

/// Body for both create and update; update replaces every field.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddressRequest {
    pub work_address: Option<bool>,
    pub address1: String,
    pub address2: Option<String>,
    pub city_id: Option<Uuid>,
    pub phone: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct AddressList {
    #[schema(value_type = Vec<Address>)]
    pub items: Vec<Address>,
}
