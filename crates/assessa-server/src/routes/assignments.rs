use axum::extract::{Path, Query, State};
use axum::Json;

use assessa_core::api_paths::Resource;
use assessa_core::models::assignment::Assignment;
use assessa_search::query::AssignmentQuery;

use super::crud;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_assignments(
    State(state): State<AppState>,
    Query(query): Query<AssignmentQuery>,
) -> Result<Json<Vec<Assignment>>, ApiError> {
    Ok(Json(crud::list(&state, Resource::Assignments, &query).await?))
}

pub async fn delete_assignment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<AssignmentQuery>,
) -> Result<Json<Vec<Assignment>>, ApiError> {
    state.backend.delete_by_id(Resource::Assignments, id).await?;
    Ok(Json(crud::list(&state, Resource::Assignments, &query).await?))
}
