//! Shared list, update and delete plumbing for the admin entity routes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use assessa_core::api_paths::Resource;
use assessa_search::query::{apply, Filter};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
struct Identified {
    id: i64,
}

/// Fetch a full list and apply the query.
pub async fn list<T, Q>(state: &AppState, resource: Resource, query: &Q) -> Result<Vec<T>, ApiError>
where
    T: DeserializeOwned,
    Q: Filter<T>,
{
    let items: Vec<T> = state.backend.find_all(resource).await?;
    Ok(apply(items, query))
}

/// Id of the entity currently called `name`.
pub async fn id_of(state: &AppState, resource: Resource, name: &str) -> Result<i64, ApiError> {
    let found: Identified = state.backend.find_one(resource, name).await?;
    Ok(found.id)
}

/// Send an update in whichever style the resource expects.
pub async fn update<B>(state: &AppState, resource: Resource, name: &str, body: &B) -> Result<Value, ApiError>
where
    B: Serialize,
{
    let updated = if resource.keyed_by_body() {
        let id = id_of(state, resource, name).await?;
        state.backend.update_with_id(resource, id, body).await?
    } else {
        state.backend.update_by_name(resource, name, body).await?
    };
    Ok(updated)
}

/// Delete by name, then refetch so the caller sees the list without it.
pub async fn delete_and_refetch<T, Q>(
    state: &AppState,
    resource: Resource,
    name: &str,
    query: &Q,
) -> Result<Vec<T>, ApiError>
where
    T: DeserializeOwned,
    Q: Filter<T>,
{
    state.backend.delete_by_name(resource, name).await?;
    list(state, resource, query).await
}
