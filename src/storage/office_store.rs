//! Office persistence interface.

use async_trait::async_trait;
use uuid::Uuid;

use super::Result;
use crate::models::Office;

/// Interface for office persistence.
///
/// Implementations:
/// - `SqliteOfficeStore`: SQLite storage
/// - `MemoryOfficeStore`: in-memory storage for tests and standalone use
#[async_trait]
pub trait OfficeStore: Send + Sync {
    /// Retrieve all offices.
    async fn get_all(&self) -> Result<Vec<Office>>;

    /// Retrieve an office by id.
    async fn get_by_id(&self, office_id: Uuid) -> Result<Option<Office>>;

    /// Persist a new office.
    async fn insert(&self, office: Office) -> Result<Office>;

    /// Update an existing office. Fails with `RowNotFound` if the id is
    /// absent.
    async fn update(&self, office: &Office) -> Result<Office>;

    /// Delete an office; returns whether a row was removed.
    async fn delete(&self, office_id: Uuid) -> Result<bool>;
}
