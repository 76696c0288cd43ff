//! Admin persistence interface.

use async_trait::async_trait;
use uuid::Uuid;

use super::Result;
use crate::models::Admin;

/// Interface for admin persistence.
///
/// Implementations:
/// - `SqliteAdminStore`: SQLite storage
/// - `MemoryAdminStore`: in-memory storage for tests and standalone use
#[async_trait]
pub trait AdminStore: Send + Sync {
    /// Retrieve all admins.
    async fn get_all(&self) -> Result<Vec<Admin>>;

    /// Retrieve an admin by id.
    async fn get_by_id(&self, admin_id: Uuid) -> Result<Option<Admin>>;

    /// Persist a new admin, filling `created_at` when unset.
    async fn insert(&self, admin: Admin) -> Result<Admin>;

    /// Update an existing admin. Fails with `RowNotFound` if the id is
    /// absent.
    async fn update(&self, admin: &Admin) -> Result<Admin>;

    /// Delete an admin; returns whether a row was removed.
    async fn delete(&self, admin_id: Uuid) -> Result<bool>;

    /// Look up an admin by email address.
    async fn get_by_email(&self, email: &str) -> Result<Option<Admin>>;
}
