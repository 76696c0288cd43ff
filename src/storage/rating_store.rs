//! Rating persistence interface.

use async_trait::async_trait;
use uuid::Uuid;

use super::Result;
use crate::models::{NewRating, Rating};

/// Interface for rating persistence.
///
/// Ratings are immutable once created; `update` exists only as part of
/// the generic contract and has no service-level caller.
///
/// Implementations:
/// - `SqliteRatingStore`: SQLite storage
/// - `MemoryRatingStore`: in-memory storage for tests and standalone use
#[async_trait]
pub trait RatingStore: Send + Sync {
    /// Retrieve all ratings.
    async fn get_all(&self) -> Result<Vec<Rating>>;

    /// Retrieve a rating by id.
    async fn get_by_id(&self, rating_id: Uuid) -> Result<Option<Rating>>;

    /// Persist a new rating with a generated id and
    /// `created_at = now`.
    async fn insert(&self, rating: NewRating) -> Result<Rating>;

    /// Update an existing rating. Fails with `RowNotFound` if the id is
    /// absent.
    async fn update(&self, rating: &Rating) -> Result<Rating>;

    /// Delete a rating; returns whether a row was removed.
    async fn delete(&self, rating_id: Uuid) -> Result<bool>;

    /// Retrieve all ratings received by an employee, in store order.
    async fn get_by_employee(&self, emp_id: Uuid) -> Result<Vec<Rating>>;

    /// Retrieve all ratings submitted during a queue visit.
    async fn get_by_queue(&self, queue_id: i64) -> Result<Vec<Rating>>;

    /// Retrieve the non-empty comment texts for an employee, in store
    /// order.
    async fn get_comments_by_employee(&self, emp_id: Uuid) -> Result<Vec<String>>;
}
