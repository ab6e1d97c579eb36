//! Organization browser for administrators.

use axum::extract::{Query, State};
use axum::Json;

use assessa_core::api_paths::Resource;
use assessa_core::models::club::Club;
use assessa_core::models::position::Position;
use assessa_core::models::refs::UserRef;
use assessa_core::models::user::User;
use assessa_search::directory::{mini_club_members, position_members, DirectoryQuery, DirectorySelection};

use crate::error::ApiError;
use crate::state::AppState;

fn as_ref(user: User) -> UserRef {
    UserRef {
        id: user.id,
        name: user.name,
        role: Some(user.role),
    }
}

pub async fn directory(
    State(state): State<AppState>,
    Query(query): Query<DirectoryQuery>,
) -> Result<Json<Vec<UserRef>>, ApiError> {
    let backend = &state.backend;
    let users = match query.selection() {
        DirectorySelection::Everyone => {
            let users: Vec<User> = backend.find_all(Resource::Users).await?;
            users.into_iter().map(as_ref).collect()
        }
        DirectorySelection::Club(club) => backend.find_one::<Club>(Resource::Clubs, club).await?.user,
        DirectorySelection::MiniClub { club, mini_club } => {
            let club: Club = backend.find_one(Resource::Clubs, club).await?;
            mini_club_members(&club, mini_club)
        }
        DirectorySelection::Position { club, position } => {
            let (club, position) = tokio::try_join!(
                backend.find_one::<Club>(Resource::Clubs, club),
                backend.find_one::<Position>(Resource::Positions, position),
            )?;
            position_members(&club, &position)
        }
    };
    Ok(Json(users))
}
