//! Server-held assignment wizard drafts.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use assessa_auth::identity::Session;
use assessa_core::api_paths::Resource;
use assessa_core::models::refs::EntityRef;
use assessa_core::models::test::Test;
use assessa_instruments::record::preview_record;
use assessa_instruments::wizard::{AssignmentKind, AssignmentRequest, WizardStep, WizardSummary};

use crate::error::ApiError;
use crate::state::{AppState, WizardDraft};

fn not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("wizard draft not found: {id}"))
}

/// Run `f` against the caller's draft and return the updated draft.
async fn with_draft<F>(state: &AppState, session: &Session, id: Uuid, f: F) -> Result<WizardDraft, ApiError>
where
    F: FnOnce(&mut WizardDraft) -> Result<(), ApiError>,
{
    let mut drafts = state.drafts.lock().await;
    let draft = drafts
        .get_mut(&id)
        .filter(|d| d.owner == session.user_id)
        .ok_or_else(|| not_found(id))?;
    f(draft)?;
    draft.touch();
    Ok(draft.clone())
}

async fn read_draft(state: &AppState, session: &Session, id: Uuid) -> Result<WizardDraft, ApiError> {
    state
        .drafts
        .lock()
        .await
        .get(&id)
        .filter(|d| d.owner == session.user_id)
        .cloned()
        .ok_or_else(|| not_found(id))
}

pub async fn create_draft(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Json<WizardDraft> {
    let draft = WizardDraft::new(session.user_id.clone());
    tracing::info!(draft_id = %draft.id, "wizard draft created");
    state.drafts.lock().await.insert(draft.id, draft.clone());
    Json(draft)
}

pub async fn get_draft(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardDraft>, ApiError> {
    Ok(Json(read_draft(&state, &session, id).await?))
}

pub async fn discard_draft(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<()>, ApiError> {
    let mut drafts = state.drafts.lock().await;
    match drafts.get(&id) {
        Some(d) if d.owner == session.user_id => {
            drafts.remove(&id);
            Ok(Json(()))
        }
        _ => Err(not_found(id)),
    }
}

#[derive(Debug, Deserialize)]
pub struct ChooseTest {
    pub test: String,
    #[serde(rename = "type")]
    pub kind: AssignmentKind,
}

pub async fn choose_test(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(body): Json<ChooseTest>,
) -> Result<Json<WizardDraft>, ApiError> {
    let draft = with_draft(&state, &session, id, |d| {
        Ok(d.wizard.choose_test(body.test, body.kind)?)
    })
    .await?;
    Ok(Json(draft))
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Participants {
    People {
        reviewers: Vec<String>,
        reviewees: Vec<String>,
    },
    Target {
        target: EntityRef,
    },
}

pub async fn choose_participants(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(body): Json<Participants>,
) -> Result<Json<WizardDraft>, ApiError> {
    let draft = with_draft(&state, &session, id, |d| {
        match body {
            Participants::People { reviewers, reviewees } => d.wizard.choose_people(reviewers, reviewees)?,
            Participants::Target { target } => d.wizard.choose_target(target)?,
        }
        Ok(())
    })
    .await?;
    Ok(Json(draft))
}

pub async fn toggle_question(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path((id, slot)): Path<(Uuid, usize)>,
) -> Result<Json<WizardDraft>, ApiError> {
    let draft = with_draft(&state, &session, id, |d| {
        d.wizard.toggle_question(slot)?;
        Ok(())
    })
    .await?;
    Ok(Json(draft))
}

#[derive(Debug, Deserialize)]
pub struct ReviewerToggle {
    pub reviewer: String,
}

pub async fn toggle_reviewer(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path((id, slot)): Path<(Uuid, usize)>,
    Json(body): Json<ReviewerToggle>,
) -> Result<Json<WizardDraft>, ApiError> {
    let draft = with_draft(&state, &session, id, |d| {
        d.wizard.toggle_reviewer(slot, &body.reviewer)?;
        Ok(())
    })
    .await?;
    Ok(Json(draft))
}

#[derive(Debug, Deserialize)]
pub struct SelectAll {
    pub selected: bool,
}

/// Per-question select-all of reviewers.
pub async fn select_all_reviewers(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path((id, slot)): Path<(Uuid, usize)>,
    Json(body): Json<SelectAll>,
) -> Result<Json<WizardDraft>, ApiError> {
    let draft = with_draft(&state, &session, id, |d| {
        Ok(d.wizard.set_all_reviewers(slot, body.selected)?)
    })
    .await?;
    Ok(Json(draft))
}

/// Global select-all of questions.
pub async fn select_all_questions(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(body): Json<SelectAll>,
) -> Result<Json<WizardDraft>, ApiError> {
    let draft = with_draft(&state, &session, id, |d| {
        Ok(d.wizard.select_all_questions(body.selected)?)
    })
    .await?;
    Ok(Json(draft))
}

/// Advance one step. Entering the question step loads the test structure
/// the first time.
pub async fn next_step(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardDraft>, ApiError> {
    let draft = with_draft(&state, &session, id, |d| {
        d.wizard.next()?;
        Ok(())
    })
    .await?;

    if draft.wizard.current_step() != WizardStep::Questions || !draft.wizard.needs_questions() {
        return Ok(Json(draft));
    }

    let name = draft.wizard.test().unwrap_or_default().to_string();
    let test: Test = match state.backend.find_one(Resource::Tests, &name).await {
        Ok(test) => test,
        Err(e) => {
            // Stay on the participants step so the next call retries the fetch.
            with_draft(&state, &session, id, |d| {
                if d.wizard.current_step() == WizardStep::Questions && d.wizard.needs_questions() {
                    d.wizard.back()?;
                }
                Ok(())
            })
            .await?;
            return Err(e.into());
        }
    };
    let draft = with_draft(&state, &session, id, |d| {
        if d.wizard.needs_questions() && d.wizard.test() == Some(test.name.as_str()) {
            d.wizard.load_questions(&test)?;
        }
        Ok(())
    })
    .await?;
    Ok(Json(draft))
}

pub async fn previous_step(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardDraft>, ApiError> {
    let draft = with_draft(&state, &session, id, |d| {
        d.wizard.back()?;
        Ok(())
    })
    .await?;
    Ok(Json(draft))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub summary: WizardSummary,
    pub request: AssignmentRequest,
    /// Per slot of the test, the reviewers the backend will record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_preview: Option<Vec<Vec<String>>>,
}

pub async fn summary(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<SummaryView>, ApiError> {
    let draft = read_draft(&state, &session, id).await?;
    let summary = draft.wizard.summary()?;
    let request = draft.wizard.build_request()?;

    let record_preview = match &request {
        AssignmentRequest::Person {
            reviewer, assignments, ..
        } => {
            let questions: Vec<_> = draft.wizard.questions().iter().map(|s| s.question.clone()).collect();
            Some(preview_record(&questions, assignments, reviewer))
        }
        _ => None,
    };

    Ok(Json(SummaryView {
        summary,
        request,
        record_preview,
    }))
}

/// Submit the draft to the backend and discard it.
pub async fn submit(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let draft = read_draft(&state, &session, id).await?;
    let request = draft.wizard.build_request()?;

    let created = state.backend.create_assignment(&request).await?;

    state.drafts.lock().await.remove(&id);
    tracing::info!(draft_id = %id, "wizard draft submitted");
    Ok(Json(created))
}
