use axum::extract::{Query, State};
use axum::Json;

use assessa_core::api_paths::Resource;
use assessa_core::models::assignment::Assignment;
use assessa_instruments::analytics::{summarize, Dashboard};
use assessa_search::query::{apply, UserScoreQuery};

use crate::error::ApiError;
use crate::state::AppState;

/// Statistics over every assignment. `q` narrows the per-user rollup only.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<UserScoreQuery>,
) -> Result<Json<Dashboard>, ApiError> {
    let assignments: Vec<Assignment> = state.backend.find_all(Resource::Assignments).await?;
    let mut dashboard = summarize(&assignments);
    dashboard.users = apply(dashboard.users, &query);
    Ok(Json(dashboard))
}
