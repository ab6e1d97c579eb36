use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::Value;

use assessa_core::api_paths::Resource;
use assessa_core::inputs::QuestionInput;
use assessa_core::models::question::Question;
use assessa_search::query::QuestionQuery;

use super::crud;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<QuestionQuery>,
) -> Result<Json<Vec<Question>>, ApiError> {
    Ok(Json(crud::list(&state, Resource::Questions, &query).await?))
}

pub async fn get_question(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Question>, ApiError> {
    Ok(Json(state.backend.find_one(Resource::Questions, &name).await?))
}

pub async fn create_question(
    State(state): State<AppState>,
    Json(input): Json<QuestionInput>,
) -> Result<Json<Value>, ApiError> {
    input.validate()?;
    Ok(Json(state.backend.create(Resource::Questions, &input).await?))
}

pub async fn update_question(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(input): Json<QuestionInput>,
) -> Result<Json<Value>, ApiError> {
    input.validate()?;
    Ok(Json(crud::update(&state, Resource::Questions, &name, &input).await?))
}

pub async fn delete_question(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<QuestionQuery>,
) -> Result<Json<Vec<Question>>, ApiError> {
    Ok(Json(
        crud::delete_and_refetch(&state, Resource::Questions, &name, &query).await?,
    ))
}
