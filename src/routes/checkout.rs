use axum::{Json, Router, extract::State, routing::put};

use crate::{
    dto::orders::{CheckoutRequest, OrderWithItems},
    error::{AppResult, ErrorData},
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", put(checkout))
}

#[utoipa::path(
    put,
    path = "/api/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Open order finalized", body = ApiResponse<OrderWithItems>),
        (status = 400, description = "Note too long", body = ApiResponse<ErrorData>),
        (status = 403, description = "Address belongs to another user", body = ApiResponse<ErrorData>),
        (status = 404, description = "No active order, or address not found", body = ApiResponse<ErrorData>),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn checkout(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let resp = order_service::checkout(&state, &user, payload).await?;
    Ok(Json(resp))
}
