//! Queue ticket persistence interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::Result;
use crate::models::{NewQueue, Queue};

/// Interface for queue ticket persistence.
///
/// Queue ids are store-assigned sequence numbers; `insert` takes the
/// id-less payload and returns the persisted record.
///
/// Implementations:
/// - `SqliteQueueStore`: SQLite storage
/// - `MemoryQueueStore`: in-memory storage for tests and standalone use
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Retrieve all queue tickets, open and closed.
    async fn get_all(&self) -> Result<Vec<Queue>>;

    /// Retrieve a queue ticket by id.
    async fn get_by_id(&self, queue_id: i64) -> Result<Option<Queue>>;

    /// Persist a new queue ticket with a generated id,
    /// `created_at = now`, and `ended_at` unset.
    async fn insert(&self, queue: NewQueue) -> Result<Queue>;

    /// Update an existing queue ticket. Fails with `RowNotFound` if the
    /// id is absent.
    async fn update(&self, queue: &Queue) -> Result<Queue>;

    /// Delete a queue ticket; returns whether a row was removed.
    async fn delete(&self, queue_id: i64) -> Result<bool>;

    /// Retrieve all open tickets (`ended_at` unset). No ordering
    /// guarantee.
    async fn get_active(&self) -> Result<Vec<Queue>>;

    /// Retrieve all tickets ever minted for a client.
    async fn get_by_client(&self, client_id: Uuid) -> Result<Vec<Queue>>;

    /// Retrieve tickets created within `[start, end]`.
    async fn get_by_created_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Queue>>;
}
