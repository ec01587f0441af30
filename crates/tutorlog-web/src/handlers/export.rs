//! CSV export handler.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use tracing::info;
use uuid::Uuid;

use tutorlog_core::{LearnerRepository, NoteOrder, NoteRepository};

use crate::csv::{export_filename, notes_csv};
use crate::error::ApiError;
use crate::AppState;

/// GET /learners/{id}/export — download the learner's notes as CSV.
pub async fn export_notes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let learner = state.db.learners.fetch(id).await?;
    let notes = state
        .db
        .notes
        .list_for_learner(id, NoteOrder::CreatedAsc)
        .await?;

    let body = notes_csv(&learner, &notes);
    let filename = export_filename(&learner.name);

    info!(
        subsystem = "web",
        component = "export",
        op = "csv",
        learner_id = %id,
        rows = notes.len(),
        "Exported notes as CSV"
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    // Names with characters invalid in a header fall back to a fixed filename.
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
            .unwrap_or_else(|_| HeaderValue::from_static("attachment; filename=\"notes.csv\"")),
    );

    Ok((StatusCode::OK, headers, body))
}
