use axum::extract::State;
use axum::{Extension, Json};

use assessa_auth::identity::Session;
use assessa_core::api_paths::Resource;
use assessa_core::models::user::User;
use assessa_search::personal::{my_assessments, my_profile, MyAssessment, MyProfile};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_me(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<MyProfile>, ApiError> {
    let name = session.display_name.as_str();
    let (user, assignments) = tokio::try_join!(
        state.backend.find_one::<User>(Resource::Users, name),
        state.backend.test_data(name),
    )?;
    Ok(Json(my_profile(user, &assignments)))
}

pub async fn my_assessment_list(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<MyAssessment>>, ApiError> {
    let assignments = state.backend.test_data(&session.display_name).await?;
    Ok(Json(my_assessments(&assignments)))
}
