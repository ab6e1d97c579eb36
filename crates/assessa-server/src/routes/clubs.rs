use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::Value;

use assessa_core::api_paths::Resource;
use assessa_core::inputs::ClubInput;
use assessa_core::models::club::Club;
use assessa_search::cards::{cards, ClubCard};
use assessa_search::query::ClubQuery;

use super::crud;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_clubs(
    State(state): State<AppState>,
    Query(query): Query<ClubQuery>,
) -> Result<Json<Vec<ClubCard>>, ApiError> {
    let clubs: Vec<Club> = crud::list(&state, Resource::Clubs, &query).await?;
    Ok(Json(cards(clubs)))
}

pub async fn get_club(State(state): State<AppState>, Path(name): Path<String>) -> Result<Json<Club>, ApiError> {
    Ok(Json(state.backend.find_one(Resource::Clubs, &name).await?))
}

pub async fn create_club(
    State(state): State<AppState>,
    Json(input): Json<ClubInput>,
) -> Result<Json<Value>, ApiError> {
    input.validate()?;
    Ok(Json(state.backend.create(Resource::Clubs, &input).await?))
}

pub async fn update_club(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(input): Json<ClubInput>,
) -> Result<Json<Value>, ApiError> {
    input.validate()?;
    Ok(Json(crud::update(&state, Resource::Clubs, &name, &input).await?))
}

pub async fn delete_club(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<ClubQuery>,
) -> Result<Json<Vec<ClubCard>>, ApiError> {
    let clubs: Vec<Club> = crud::delete_and_refetch(&state, Resource::Clubs, &name, &query).await?;
    Ok(Json(cards(clubs)))
}
