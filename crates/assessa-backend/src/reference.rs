//! Reference lists for form autocompletes.
//!
//! Each form needs a few `findAll` lists; they are fetched concurrently and
//! reduced to names. Any failed fetch fails the whole load.

use serde::{Deserialize, Serialize};

use assessa_core::api_paths::Resource;

use crate::client::BackendClient;
use crate::error::BackendError;

#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

/// Which form the options are for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormKind {
    Club,
    MiniClub,
    Position,
    User,
    MiniTest,
    Test,
    Wizard,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clubs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mini_clubs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub positions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mini_tests: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tests: Vec<String>,
}

impl BackendClient {
    /// Names of every entity of a resource, in backend order.
    pub async fn names(&self, resource: Resource) -> Result<Vec<String>, BackendError> {
        let rows: Vec<Named> = self.find_all(resource).await?;
        Ok(rows.into_iter().map(|r| r.name).collect())
    }
}

pub async fn load_options(client: &BackendClient, form: FormKind) -> Result<FormOptions, BackendError> {
    let mut options = FormOptions::default();
    match form {
        FormKind::Club => {
            (options.positions, options.mini_clubs) = tokio::try_join!(
                client.names(Resource::Positions),
                client.names(Resource::MiniClubs),
            )?;
        }
        FormKind::MiniClub | FormKind::Position => {
            (options.clubs, options.users) = tokio::try_join!(
                client.names(Resource::Clubs),
                client.names(Resource::Users),
            )?;
        }
        FormKind::User => {
            (options.clubs, options.mini_clubs, options.positions) = tokio::try_join!(
                client.names(Resource::Clubs),
                client.names(Resource::MiniClubs),
                client.names(Resource::Positions),
            )?;
        }
        FormKind::MiniTest => {
            options.questions = client.names(Resource::Questions).await?;
        }
        FormKind::Test => {
            options.mini_tests = client.names(Resource::MiniTests).await?;
        }
        FormKind::Wizard => {
            (options.tests, options.users, options.mini_clubs, options.positions) = tokio::try_join!(
                client.names(Resource::Tests),
                client.names(Resource::Users),
                client.names(Resource::MiniClubs),
                client.names(Resource::Positions),
            )?;
        }
    }
    Ok(options)
}
