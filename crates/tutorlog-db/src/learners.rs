//! Learner repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use tracing::{debug, info};
use uuid::Uuid;

use tutorlog_core::{
    new_v7, CreateLearnerRequest, Error, Learner, LearnerFilter, LearnerRepository,
    LearnerSummary, ListLearnersRequest, Result, UpdateLearnerRequest,
};

use crate::escape_like;

/// PostgreSQL implementation of LearnerRepository.
#[derive(Clone)]
pub struct PgLearnerRepository {
    pool: Pool<Postgres>,
}

impl PgLearnerRepository {
    /// Create a new PgLearnerRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Shared SELECT list for learner summaries.
///
/// `notes_count` is a correlated subquery rather than a JOIN + GROUP BY so
/// learners without notes still produce a row with a zero count.
const SUMMARY_SELECT: &str = "SELECT l.id, l.name, l.language, l.level, l.created_at_utc, \
     (SELECT COUNT(*) FROM note n WHERE n.learner_id = l.id) AS notes_count \
     FROM learner l";

#[async_trait]
impl LearnerRepository for PgLearnerRepository {
    async fn insert(&self, req: CreateLearnerRequest) -> Result<Uuid> {
        let req = req.normalize()?;
        let id = new_v7();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO learner (id, name, language, level, created_at_utc) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(&req.name)
        .bind(req.language_or_default())
        .bind(&req.level)
        .bind(now)
        .execute(&self.pool)
        .await?;

        info!(
            subsystem = "database",
            component = "learners",
            op = "insert",
            learner_id = %id,
            "Learner created"
        );
        Ok(id)
    }

    async fn fetch(&self, id: Uuid) -> Result<Learner> {
        sqlx::query_as::<_, Learner>(
            "SELECT id, name, language, level, created_at_utc FROM learner WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::LearnerNotFound(id))
    }

    async fn list(&self, req: ListLearnersRequest) -> Result<Vec<LearnerSummary>> {
        // Case-sensitive lexicographic order, independent of the database's
        // default collation.
        const ORDER: &str = " ORDER BY l.name COLLATE \"C\"";

        let rows = match req.effective_filter() {
            None => {
                sqlx::query_as::<_, LearnerSummary>(&format!("{}{}", SUMMARY_SELECT, ORDER))
                    .fetch_all(&self.pool)
                    .await?
            }
            Some(filter) => {
                let (column, needle) = match filter {
                    LearnerFilter::Name(s) => ("l.name", s),
                    LearnerFilter::Language(s) => ("l.language", s),
                };
                let query =
                    format!("{} WHERE {} ILIKE $1{}", SUMMARY_SELECT, column, ORDER);
                sqlx::query_as::<_, LearnerSummary>(&query)
                    .bind(format!("%{}%", escape_like(needle)))
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        debug!(
            subsystem = "database",
            component = "learners",
            op = "list",
            count = rows.len(),
            "Listed learners"
        );
        Ok(rows)
    }

    async fn update(&self, id: Uuid, req: UpdateLearnerRequest) -> Result<()> {
        let req = req.normalize()?;
        let result = sqlx::query(
            "UPDATE learner SET name = $2, language = $3, level = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(&req.name)
        .bind(req.language.as_deref())
        .bind(&req.level)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::LearnerNotFound(id));
        }

        info!(
            subsystem = "database",
            component = "learners",
            op = "update",
            learner_id = %id,
            "Learner updated"
        );
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        // Explicit cascade: the FK's ON DELETE CASCADE would cover the notes,
        // but deleting them in the same transaction keeps the cascade visible
        // and auditable.
        let mut tx = self.pool.begin().await?;

        let notes_deleted = sqlx::query("DELETE FROM note WHERE learner_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let result = sqlx::query("DELETE FROM learner WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::LearnerNotFound(id));
        }

        tx.commit().await?;

        info!(
            subsystem = "database",
            component = "learners",
            op = "delete",
            learner_id = %id,
            notes_deleted,
            "Learner and owned notes deleted"
        );
        Ok(())
    }
}
