use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::cities::{CityList, CityRequest},
    error::{AppResult, ErrorData},
    middleware::auth::AuthUser,
    models::City,
    response::ApiResponse,
    services::city_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cities).post(create_city))
        .route(
            "/{id}",
            get(get_city).put(update_city).delete(delete_city),
        )
}

#[utoipa::path(
    get,
    path = "/api/cities",
    responses(
        (status = 200, description = "List cities", body = ApiResponse<CityList>),
        (status = 404, description = "No cities found", body = ApiResponse<ErrorData>),
    ),
    tag = "Cities"
)]
pub async fn list_cities(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CityList>>> {
    let resp = city_service::list_cities(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/cities/{id}",
    params(
        ("id" = Uuid, Path, description = "City ID")
    ),
    responses(
        (status = 200, description = "Get city", body = ApiResponse<City>),
        (status = 404, description = "City not found", body = ApiResponse<ErrorData>),
    ),
    tag = "Cities"
)]
pub async fn get_city(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<City>>> {
    let resp = city_service::get_city(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cities",
    request_body = CityRequest,
    responses(
        (status = 201, description = "City created", body = ApiResponse<City>),
        (status = 400, description = "Invalid name", body = ApiResponse<ErrorData>),
        (status = 403, description = "Admin only", body = ApiResponse<ErrorData>),
    ),
    security(("bearer_auth" = [])),
    tag = "Cities"
)]
pub async fn create_city(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CityRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<City>>)> {
    let resp = city_service::create_city(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/cities/{id}",
    params(
        ("id" = Uuid, Path, description = "City ID")
    ),
    request_body = CityRequest,
    responses(
        (status = 200, description = "City renamed", body = ApiResponse<City>),
        (status = 403, description = "Admin only", body = ApiResponse<ErrorData>),
        (status = 404, description = "City not found", body = ApiResponse<ErrorData>),
    ),
    security(("bearer_auth" = [])),
    tag = "Cities"
)]
pub async fn update_city(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CityRequest>,
) -> AppResult<Json<ApiResponse<City>>> {
    let resp = city_service::update_city(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cities/{id}",
    params(
        ("id" = Uuid, Path, description = "City ID")
    ),
    responses(
        (status = 204, description = "City deleted"),
        (status = 403, description = "Admin only", body = ApiResponse<ErrorData>),
        (status = 404, description = "City not found", body = ApiResponse<ErrorData>),
    ),
    security(("bearer_auth" = [])),
    tag = "Cities"
)]
pub async fn delete_city(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    city_service::delete_city(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
