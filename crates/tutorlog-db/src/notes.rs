//! Note repository implementation.
//!
//! Notes are insert-and-delete only; there is no update path, so a note's
//! `created_at_utc` always reflects its position in the learner's history.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use tracing::info;
use uuid::Uuid;

use tutorlog_core::{
    new_v7, CreateNoteRequest, Error, Note, NoteOrder, NoteRepository, Result,
};

/// PostgreSQL implementation of NoteRepository.
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn insert(&self, req: CreateNoteRequest) -> Result<Uuid> {
        let req = req.normalize()?;

        // Resolve the owner first so an unknown learner surfaces as
        // LearnerNotFound rather than an FK violation.
        let owner_exists = sqlx::query("SELECT 1 FROM learner WHERE id = $1")
            .bind(req.learner_id)
            .fetch_optional(&self.pool)
            .await?
            .is_some();
        if !owner_exists {
            return Err(Error::LearnerNotFound(req.learner_id));
        }

        let id = new_v7();
        sqlx::query(
            "INSERT INTO note (id, learner_id, content, tags, created_at_utc) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(req.learner_id)
        .bind(&req.content)
        .bind(&req.tags)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        info!(
            subsystem = "database",
            component = "notes",
            op = "insert",
            note_id = %id,
            learner_id = %req.learner_id,
            "Note created"
        );
        Ok(id)
    }

    async fn fetch(&self, id: Uuid) -> Result<Note> {
        sqlx::query_as::<_, Note>(
            "SELECT id, learner_id, content, tags, created_at_utc FROM note WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::NoteNotFound(id))
    }

    async fn list_for_learner(&self, learner_id: Uuid, order: NoteOrder) -> Result<Vec<Note>> {
        let query = match order {
            NoteOrder::CreatedAsc => {
                "SELECT id, learner_id, content, tags, created_at_utc FROM note \
                 WHERE learner_id = $1 ORDER BY created_at_utc ASC, id ASC"
            }
            NoteOrder::CreatedDesc => {
                "SELECT id, learner_id, content, tags, created_at_utc FROM note \
                 WHERE learner_id = $1 ORDER BY created_at_utc DESC, id DESC"
            }
        };

        let notes = sqlx::query_as::<_, Note>(query)
            .bind(learner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(notes)
    }

    async fn delete(&self, id: Uuid) -> Result<Uuid> {
        let row = sqlx::query("DELETE FROM note WHERE id = $1 RETURNING learner_id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(Error::NoteNotFound(id))?;
        let learner_id: Uuid = row.try_get("learner_id")?;

        info!(
            subsystem = "database",
            component = "notes",
            op = "delete",
            note_id = %id,
            learner_id = %learner_id,
            "Note deleted"
        );
        Ok(learner_id)
    }
}
