//! Client persistence interface.

use async_trait::async_trait;
use uuid::Uuid;

use super::Result;
use crate::models::Client;

/// Interface for client persistence.
///
/// Implementations:
/// - `SqliteClientStore`: SQLite storage
/// - `MemoryClientStore`: in-memory storage for tests and standalone use
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Retrieve all clients.
    async fn get_all(&self) -> Result<Vec<Client>>;

    /// Retrieve a client by id.
    async fn get_by_id(&self, client_id: Uuid) -> Result<Option<Client>>;

    /// Persist a new client, filling `created_at` when unset.
    async fn insert(&self, client: Client) -> Result<Client>;

    /// Update an existing client. Fails with `RowNotFound` if the id is
    /// absent.
    async fn update(&self, client: &Client) -> Result<Client>;

    /// Delete a client; returns whether a row was removed.
    async fn delete(&self, client_id: Uuid) -> Result<bool>;
}
