use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::Value;

use assessa_core::api_paths::Resource;
use assessa_core::inputs::PositionInput;
use assessa_core::models::position::Position;
use assessa_search::cards::{cards, PositionCard};
use assessa_search::query::PositionQuery;

use super::crud;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_positions(
    State(state): State<AppState>,
    Query(query): Query<PositionQuery>,
) -> Result<Json<Vec<PositionCard>>, ApiError> {
    let positions: Vec<Position> = crud::list(&state, Resource::Positions, &query).await?;
    Ok(Json(cards(positions)))
}

pub async fn get_position(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Position>, ApiError> {
    Ok(Json(state.backend.find_one(Resource::Positions, &name).await?))
}

pub async fn create_position(
    State(state): State<AppState>,
    Json(input): Json<PositionInput>,
) -> Result<Json<Value>, ApiError> {
    input.validate()?;
    Ok(Json(state.backend.create(Resource::Positions, &input).await?))
}

pub async fn update_position(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(input): Json<PositionInput>,
) -> Result<Json<Value>, ApiError> {
    input.validate()?;
    Ok(Json(crud::update(&state, Resource::Positions, &name, &input).await?))
}

pub async fn delete_position(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<PositionQuery>,
) -> Result<Json<Vec<PositionCard>>, ApiError> {
    let positions: Vec<Position> =
        crud::delete_and_refetch(&state, Resource::Positions, &name, &query).await?;
    Ok(Json(cards(positions)))
}
