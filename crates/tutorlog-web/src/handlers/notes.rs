//! Note handlers: add under a learner, delete.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Form;
use serde::Deserialize;
use uuid::Uuid;

use tutorlog_core::{CreateNoteRequest, LearnerRepository, NoteRepository};

use super::redirect_with_notice;
use crate::error::ApiError;
use crate::flash::Notice;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Option<String>,
}

/// POST /learners/{id}/notes — insert a note, then redirect to the detail page.
pub async fn add_note(
    State(state): State<AppState>,
    Path(learner_id): Path<Uuid>,
    Form(form): Form<NoteForm>,
) -> Result<Response, ApiError> {
    // Unknown learner is a 404, not a validation notice.
    state.db.learners.fetch(learner_id).await?;

    let detail = format!("/learners/{}", learner_id);
    if form.content.trim().is_empty() {
        return Ok(redirect_with_notice(
            &state,
            &detail,
            Notice::error("Note content must not be blank."),
        ));
    }

    state
        .db
        .notes
        .insert(CreateNoteRequest {
            learner_id,
            content: form.content,
            tags: form.tags,
        })
        .await?;

    Ok(redirect_with_notice(
        &state,
        &detail,
        Notice::success("Note added."),
    ))
}

/// GET /note/{id}/delete — delete, then redirect to the former owner's page.
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let owner_id = state.db.notes.delete(id).await?;

    Ok(redirect_with_notice(
        &state,
        &format!("/learners/{}", owner_id),
        Notice::success("Note deleted."),
    ))
}
