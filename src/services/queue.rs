//! Queue ticket lifecycle.
//!
//! A ticket is OPEN from creation until `end` stamps `ended_at`; CLOSED
//! is terminal.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::models::{NewQueue, Queue};
use crate::storage::{QueueStore, StoreError};

/// Errors from queue lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("queue {0} not found")]
    NotFound(i64),

    /// The ticket was already closed; the original `ended_at` is kept.
    #[error("queue {id} already ended at {ended_at}")]
    AlreadyEnded { id: i64, ended_at: DateTime<Utc> },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Creates, tracks, and closes queue tickets.
#[derive(Clone)]
pub struct QueueService {
    queues: Arc<dyn QueueStore>,
}

impl QueueService {
    pub fn new(queues: Arc<dyn QueueStore>) -> Self {
        Self { queues }
    }

    /// Mint a new open ticket for a client.
    ///
    /// Nothing prevents a client from holding several open tickets; the
    /// registration flow mints one per registration and relies on clients
    /// ending them.
    pub async fn create(&self, client_id: Uuid) -> Result<Queue, QueueError> {
        let queue = self.queues.insert(NewQueue { client_id }).await?;
        info!(queue_id = queue.queue_id, %client_id, "queue created");
        Ok(queue)
    }

    /// Close an open ticket, stamping `ended_at = now`.
    ///
    /// Closing a ticket twice fails with `AlreadyEnded` and leaves the
    /// original end time in place. The read-then-write here has no
    /// compare-and-swap guard, so two concurrent closes of the same open
    /// ticket race and the last write wins.
    pub async fn end(&self, queue_id: i64) -> Result<Queue, QueueError> {
        let mut queue = self
            .queues
            .get_by_id(queue_id)
            .await?
            .ok_or(QueueError::NotFound(queue_id))?;

        if let Some(ended_at) = queue.ended_at {
            return Err(QueueError::AlreadyEnded {
                id: queue_id,
                ended_at,
            });
        }

        queue.ended_at = Some(Utc::now());
        let queue = self.queues.update(&queue).await?;
        info!(queue_id, "queue ended");
        Ok(queue)
    }

    /// All tickets, open and closed.
    pub async fn get_all(&self) -> Result<Vec<Queue>, QueueError> {
        Ok(self.queues.get_all().await?)
    }

    pub async fn get_by_id(&self, queue_id: i64) -> Result<Option<Queue>, QueueError> {
        Ok(self.queues.get_by_id(queue_id).await?)
    }

    /// All open tickets. No ordering guarantee; callers sort as needed.
    pub async fn get_active(&self) -> Result<Vec<Queue>, QueueError> {
        Ok(self.queues.get_active().await?)
    }

    /// Full ticket history for a client.
    pub async fn get_by_client(&self, client_id: Uuid) -> Result<Vec<Queue>, QueueError> {
        Ok(self.queues.get_by_client(client_id).await?)
    }

    /// Tickets created within `[start, end]`, for reporting.
    pub async fn get_by_created_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Queue>, QueueError> {
        Ok(self.queues.get_by_created_range(start, end).await?)
    }
}
