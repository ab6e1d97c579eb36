use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::Value;

use assessa_core::api_paths::Resource;
use assessa_core::inputs::UserInput;
use assessa_core::models::user::User;
use assessa_search::query::UserQuery;

use super::crud;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(crud::list(&state, Resource::Users, &query).await?))
}

pub async fn get_user(State(state): State<AppState>, Path(name): Path<String>) -> Result<Json<User>, ApiError> {
    Ok(Json(state.backend.find_one(Resource::Users, &name).await?))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<UserInput>,
) -> Result<Json<Value>, ApiError> {
    input.validate()?;
    Ok(Json(state.backend.create(Resource::Users, &input).await?))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(input): Json<UserInput>,
) -> Result<Json<Value>, ApiError> {
    input.validate()?;
    Ok(Json(crud::update(&state, Resource::Users, &name, &input).await?))
}

/// Users are deleted by id.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    let id = crud::id_of(&state, Resource::Users, &name).await?;
    state.backend.delete_by_id(Resource::Users, id).await?;
    Ok(Json(crud::list(&state, Resource::Users, &query).await?))
}
