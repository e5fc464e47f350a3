use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::products::{CategoryList, ProductList, VendorList},
    error::{AppResult, ErrorData},
    models::Product,
    response::ApiResponse,
    routes::params::ProductQuery,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
}

pub fn vendor_router() -> Router<AppState> {
    Router::new().route("/", get(list_vendors))
}

pub fn category_router() -> Router<AppState> {
    Router::new().route("/", get(list_categories))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("q" = Option<String>, Query, description = "Search in name and description"),
        ("price_from" = Option<i64>, Query, description = "Minimum discounted price, inclusive"),
        ("price_to" = Option<i64>, Query, description = "Maximum discounted price, inclusive"),
        ("vendor_id" = Option<Uuid>, Query, description = "Only products of this vendor"),
        ("category_id" = Option<Uuid>, Query, description = "Only products in this category"),
    ),
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductList>),
        (status = 400, description = "Inverted price bounds", body = ApiResponse<ErrorData>),
        (status = 404, description = "Catalog is empty", body = ApiResponse<ErrorData>),
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found", body = ApiResponse<ErrorData>),
    ),
    tag = "Products"
)]
pub async fn get_product(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::get_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/vendors",
    responses(
        (status = 200, description = "List vendors", body = ApiResponse<VendorList>)
    ),
    tag = "Products"
)]
pub async fn list_vendors(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<VendorList>>> {
    let resp = product_service::list_vendors(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List active categories", body = ApiResponse<CategoryList>)
    ),
    tag = "Products"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = product_service::list_categories(&state).await?;
    Ok(Json(resp))
}
