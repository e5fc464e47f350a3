use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::City;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CityRequest {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CityList {
    #[schema(value_type = Vec<City>)]
    pub items: Vec<City>,
}
