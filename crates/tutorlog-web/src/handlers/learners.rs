//! Learner page handlers: list, create, view, edit, delete.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Form;
use serde::Deserialize;
use uuid::Uuid;

use tutorlog_core::{
    CreateLearnerRequest, LearnerRepository, ListLearnersRequest, NoteOrder, NoteRepository,
    UpdateLearnerRequest,
};

use super::{redirect_with_notice, rendered};
use crate::error::ApiError;
use crate::flash::{self, Notice};
use crate::render;
use crate::AppState;

/// Query parameters on the list page.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Name substring filter.
    pub q: Option<String>,
    /// Language substring filter. When both are present this one wins.
    pub language: Option<String>,
}

/// Form fields shared by the create and edit forms.
#[derive(Debug, Deserialize)]
pub struct LearnerForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

/// GET / — learner table with optional substring filters.
pub async fn list_learners(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let had_notice_cookie = flash::present(&headers);
    let notice = flash::take(&headers, &state.secret);
    let rows = state
        .db
        .learners
        .list(ListLearnersRequest {
            name_contains: query.q.clone(),
            language_contains: query.language.clone(),
        })
        .await?;

    let html = render::learners_page(
        &rows,
        query.q.as_deref(),
        query.language.as_deref(),
        notice.as_ref(),
    );
    Ok(rendered(html, had_notice_cookie))
}

/// GET /learners/new — blank create form.
pub async fn new_learner_form(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let had_notice_cookie = flash::present(&headers);
    let notice = flash::take(&headers, &state.secret);
    let html =
        render::learner_form_page("New learner", "/learners/new", "", "", "", notice.as_ref());
    Ok(rendered(html, had_notice_cookie))
}

/// POST /learners/new — validate and insert, then redirect.
pub async fn create_learner(
    State(state): State<AppState>,
    Form(form): Form<LearnerForm>,
) -> Result<Response, ApiError> {
    if form.name.trim().is_empty() {
        return Ok(redirect_with_notice(
            &state,
            "/learners/new",
            Notice::error("Name must not be blank."),
        ));
    }

    state
        .db
        .learners
        .insert(CreateLearnerRequest {
            name: form.name,
            language: form.language,
            level: form.level,
        })
        .await?;

    Ok(redirect_with_notice(
        &state,
        "/",
        Notice::success("Learner created."),
    ))
}

/// GET /learners/{id} — detail page with notes newest-first.
pub async fn view_learner(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let had_notice_cookie = flash::present(&headers);
    let notice = flash::take(&headers, &state.secret);
    let learner = state.db.learners.fetch(id).await?;
    let notes = state
        .db
        .notes
        .list_for_learner(id, NoteOrder::CreatedDesc)
        .await?;

    let html = render::learner_detail_page(&learner, &notes, notice.as_ref());
    Ok(rendered(html, had_notice_cookie))
}

/// GET /learners/{id}/edit — form pre-filled with current values.
pub async fn edit_learner_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let had_notice_cookie = flash::present(&headers);
    let notice = flash::take(&headers, &state.secret);
    let learner = state.db.learners.fetch(id).await?;

    let html = render::learner_form_page(
        "Edit learner",
        &format!("/learners/{}/edit", id),
        &learner.name,
        &learner.language,
        learner.level.as_deref().unwrap_or(""),
        notice.as_ref(),
    );
    Ok(rendered(html, had_notice_cookie))
}

/// POST /learners/{id}/edit — update in place, then redirect to the detail page.
pub async fn update_learner(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<LearnerForm>,
) -> Result<Response, ApiError> {
    // Unknown id is a 404 even when the submission is also blank.
    state.db.learners.fetch(id).await?;

    if form.name.trim().is_empty() {
        return Ok(redirect_with_notice(
            &state,
            &format!("/learners/{}/edit", id),
            Notice::error("Name must not be blank."),
        ));
    }

    state
        .db
        .learners
        .update(
            id,
            UpdateLearnerRequest {
                name: form.name,
                language: form.language,
                level: form.level,
            },
        )
        .await?;

    Ok(redirect_with_notice(
        &state,
        &format!("/learners/{}", id),
        Notice::success("Learner updated."),
    ))
}

/// GET /learners/{id}/delete — cascading delete, then back to the list.
pub async fn delete_learner(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    state.db.learners.delete(id).await?;

    Ok(redirect_with_notice(
        &state,
        "/",
        Notice::success("Learner and their notes deleted."),
    ))
}
