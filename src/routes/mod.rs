use axum::Router;

use crate::state::AppState;

pub mod addresses;
pub mod cart;
pub mod checkout;
pub mod cities;
pub mod doc;
pub mod health;
pub mod orders;
pub mod params;
pub mod products;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/vendors", products::vendor_router())
        .nest("/categories", products::category_router())
        .nest("/cart", cart::router())
        .nest("/orders", orders::router())
        .nest("/checkout", checkout::router())
        .nest("/cities", cities::router())
        .nest("/addresses", addresses::router())
}
