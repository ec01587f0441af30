//! JSON API handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use tutorlog_core::{LearnerRepository, LearnerSummary, ListLearnersRequest};

use crate::error::ApiError;
use crate::AppState;

/// Learner entry in the API listing.
#[derive(Debug, Serialize)]
pub struct ApiLearner {
    pub id: Uuid,
    pub name: String,
    pub language: String,
    pub level: Option<String>,
    pub notes_count: i64,
}

impl From<LearnerSummary> for ApiLearner {
    fn from(l: LearnerSummary) -> Self {
        Self {
            id: l.id,
            name: l.name,
            language: l.language,
            level: l.level,
            notes_count: l.notes_count,
        }
    }
}

/// Response envelope for `GET /api/learners`.
#[derive(Debug, Serialize)]
pub struct ApiLearnersResponse {
    pub learners: Vec<ApiLearner>,
}

/// GET /api/learners — all learners with note counts, ordered by name.
pub async fn api_list_learners(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .db
        .learners
        .list(ListLearnersRequest::default())
        .await?;

    Ok(Json(ApiLearnersResponse {
        learners: rows.into_iter().map(ApiLearner::from).collect(),
    }))
}

/// GET /health — liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_empty_response_shape() {
        let response = ApiLearnersResponse { learners: vec![] };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "learners": [] }));
    }

    #[test]
    fn test_learner_entry_shape() {
        let id = Uuid::new_v4();
        let entry: ApiLearner = LearnerSummary {
            id,
            name: "Ana".to_string(),
            language: "Spanish".to_string(),
            level: None,
            notes_count: 2,
            created_at_utc: Utc::now(),
        }
        .into();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": id,
                "name": "Ana",
                "language": "Spanish",
                "level": null,
                "notes_count": 2,
            })
        );
    }
}
