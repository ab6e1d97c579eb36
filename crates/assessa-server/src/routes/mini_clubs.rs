use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::Value;

use assessa_core::api_paths::Resource;
use assessa_core::inputs::MiniClubInput;
use assessa_core::models::mini_club::MiniClub;
use assessa_search::cards::{cards, MiniClubCard};
use assessa_search::query::MiniClubQuery;

use super::crud;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_mini_clubs(
    State(state): State<AppState>,
    Query(query): Query<MiniClubQuery>,
) -> Result<Json<Vec<MiniClubCard>>, ApiError> {
    let mini_clubs: Vec<MiniClub> = crud::list(&state, Resource::MiniClubs, &query).await?;
    Ok(Json(cards(mini_clubs)))
}

pub async fn get_mini_club(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MiniClub>, ApiError> {
    Ok(Json(state.backend.find_one(Resource::MiniClubs, &name).await?))
}

pub async fn create_mini_club(
    State(state): State<AppState>,
    Json(input): Json<MiniClubInput>,
) -> Result<Json<Value>, ApiError> {
    input.validate()?;
    Ok(Json(state.backend.create(Resource::MiniClubs, &input).await?))
}

pub async fn update_mini_club(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(input): Json<MiniClubInput>,
) -> Result<Json<Value>, ApiError> {
    input.validate()?;
    Ok(Json(crud::update(&state, Resource::MiniClubs, &name, &input).await?))
}

pub async fn delete_mini_club(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<MiniClubQuery>,
) -> Result<Json<Vec<MiniClubCard>>, ApiError> {
    let mini_clubs: Vec<MiniClub> =
        crud::delete_and_refetch(&state, Resource::MiniClubs, &name, &query).await?;
    Ok(Json(cards(mini_clubs)))
}
