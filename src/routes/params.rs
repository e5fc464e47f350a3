use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductQuery {
    /// Case-insensitive match on name or description.
    pub q: Option<String>,
    /// Inclusive lower bound on the discounted price.
    pub price_from: Option<i64>,
    /// Inclusive upper bound on the discounted price.
    pub price_to: Option<i64>,
    pub vendor_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
}
