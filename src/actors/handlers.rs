// HTTP handlers for actor endpoints; every route requires a bearer token

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::actors::models::{Actor, CreateActor, UpdateActor};
use crate::actors::service::ActorService;
use crate::auth::AuthenticatedUser;
use crate::error::ApiError;

fn ensure_valid_id(id: i64) -> Result<i64, ApiError> {
    if id < 1 {
        return Err(ApiError::BadRequest(format!("Invalid actor id: {}", id)));
    }
    Ok(id)
}

/// Create an actor
#[utoipa::path(
    post,
    path = "/actors",
    request_body = CreateActor,
    responses(
        (status = 201, description = "Actor created", body = Actor),
        (status = 400, description = "Invalid input data"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "actors"
)]
pub async fn create_actor(
    State(service): State<Arc<ActorService>>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateActor>,
) -> Result<(StatusCode, Json<Actor>), ApiError> {
    debug!(user_id = user.user_id, "Create actor request");
    let actor = service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(actor)))
}

/// List all actors ordered by id
#[utoipa::path(
    get,
    path = "/actors",
    responses(
        (status = 200, description = "All actors", body = Vec<Actor>),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "actors"
)]
pub async fn list_actors(
    State(service): State<Arc<ActorService>>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<Actor>>, ApiError> {
    Ok(Json(service.get_all().await?))
}

/// Get a single actor
#[utoipa::path(
    get,
    path = "/actors/{id}",
    params(("id" = i64, Path, description = "Actor id")),
    responses(
        (status = 200, description = "Actor found", body = Actor),
        (status = 400, description = "Invalid id"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Actor not found")
    ),
    security(("bearer_auth" = [])),
    tag = "actors"
)]
pub async fn get_actor(
    State(service): State<Arc<ActorService>>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<Actor>, ApiError> {
    let id = ensure_valid_id(id)?;
    Ok(Json(service.get_by_id(id).await?))
}

/// Partially update an actor
#[utoipa::path(
    put,
    path = "/actors/{id}",
    params(("id" = i64, Path, description = "Actor id")),
    request_body = UpdateActor,
    responses(
        (status = 200, description = "Actor updated", body = Actor),
        (status = 400, description = "Invalid id or input data"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Actor not found")
    ),
    security(("bearer_auth" = [])),
    tag = "actors"
)]
pub async fn update_actor(
    State(service): State<Arc<ActorService>>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateActor>,
) -> Result<Json<Actor>, ApiError> {
    let id = ensure_valid_id(id)?;
    debug!(user_id = user.user_id, actor_id = id, "Update actor request");
    Ok(Json(service.update(id, payload).await?))
}

/// Delete an actor
#[utoipa::path(
    delete,
    path = "/actors/{id}",
    params(("id" = i64, Path, description = "Actor id")),
    responses(
        (status = 204, description = "Actor deleted"),
        (status = 400, description = "Invalid id"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Actor not found")
    ),
    security(("bearer_auth" = [])),
    tag = "actors"
)]
pub async fn delete_actor(
    State(service): State<Arc<ActorService>>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let id = ensure_valid_id(id)?;
    debug!(user_id = user.user_id, actor_id = id, "Delete actor request");
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
