use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::cart::{AddToCartRequest, CartItemChange, CartList},
    error::{AppResult, ErrorData},
    middleware::auth::AuthUser,
    models::Item,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart_list))
        .route("/items", post(add_to_cart))
        .route("/items/{id}", delete(remove_from_cart))
        .route("/items/{id}/increase", patch(increase_quantity))
        .route("/items/{id}/decrease", patch(decrease_quantity))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart lines of the current user", body = ApiResponse<CartList>),
        (status = 404, description = "Cart is empty", body = ApiResponse<ErrorData>)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn cart_list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CartList>>> {
    let resp = cart_service::list_cart(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart/items",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Add a product or grow its cart line", body = ApiResponse<Item>),
        (status = 400, description = "Invalid quantity", body = ApiResponse<ErrorData>),
        (status = 404, description = "Product or size not found", body = ApiResponse<ErrorData>),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<Item>>> {
    let resp = cart_service::add_to_cart(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/cart/items/{id}/increase",
    params(
        ("id" = Uuid, Path, description = "Cart item ID")
    ),
    responses(
        (status = 200, description = "Quantity increased by one", body = ApiResponse<CartItemChange>),
        (status = 404, description = "Cart item not found", body = ApiResponse<ErrorData>),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn increase_quantity(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CartItemChange>>> {
    let resp = cart_service::change_quantity(&state, &user, id, 1).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/cart/items/{id}/decrease",
    params(
        ("id" = Uuid, Path, description = "Cart item ID")
    ),
    responses(
        (status = 200, description = "Quantity decreased by one, or line deleted at zero", body = ApiResponse<CartItemChange>),
        (status = 404, description = "Cart item not found", body = ApiResponse<ErrorData>),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn decrease_quantity(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CartItemChange>>> {
    let resp = cart_service::change_quantity(&state, &user, id, -1).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Cart item ID")
    ),
    responses(
        (status = 204, description = "Cart line removed"),
        (status = 404, description = "Cart item not found", body = ApiResponse<ErrorData>),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    cart_service::remove_from_cart(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
