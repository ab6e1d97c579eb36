use axum::extract::{Path, State};
use axum::Json;

use assessa_backend::reference::{load_options, FormKind, FormOptions};

use crate::error::ApiError;
use crate::state::AppState;

/// Autocomplete lists for a form, fetched concurrently.
pub async fn form_options(
    State(state): State<AppState>,
    Path(form): Path<FormKind>,
) -> Result<Json<FormOptions>, ApiError> {
    Ok(Json(load_options(&state.backend, form).await?))
}
