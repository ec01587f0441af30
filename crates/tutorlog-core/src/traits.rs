//! Core repository traits for tutorlog abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

/// Repository for learner CRUD operations.
#[async_trait]
pub trait LearnerRepository: Send + Sync {
    /// Insert a new learner and return its id.
    ///
    /// The request must already be normalized; blank names are rejected
    /// with a validation error.
    async fn insert(&self, req: CreateLearnerRequest) -> Result<Uuid>;

    /// Fetch a learner by id. Fails with `LearnerNotFound` if absent.
    async fn fetch(&self, id: Uuid) -> Result<Learner>;

    /// List learners with note counts, ordered by name.
    async fn list(&self, req: ListLearnersRequest) -> Result<Vec<LearnerSummary>>;

    /// Update name/language/level in place. Fails with `LearnerNotFound`
    /// if absent.
    async fn update(&self, id: Uuid, req: UpdateLearnerRequest) -> Result<()>;

    /// Delete a learner and all of its notes in one transaction.
    /// Fails with `LearnerNotFound` if absent.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Repository for note operations. Notes are never updated.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note under an existing learner and return its id.
    ///
    /// Fails with `LearnerNotFound` if the owning learner does not exist.
    async fn insert(&self, req: CreateNoteRequest) -> Result<Uuid>;

    /// Fetch a note by id. Fails with `NoteNotFound` if absent.
    async fn fetch(&self, id: Uuid) -> Result<Note>;

    /// List all notes belonging to a learner in the requested order.
    async fn list_for_learner(&self, learner_id: Uuid, order: NoteOrder) -> Result<Vec<Note>>;

    /// Delete a note and return the id of its former owner.
    /// Fails with `NoteNotFound` if absent.
    async fn delete(&self, id: Uuid) -> Result<Uuid>;
}
