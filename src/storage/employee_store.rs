//! Employee persistence interface.

use async_trait::async_trait;
use uuid::Uuid;

use super::Result;
use crate::models::Employee;

/// Interface for employee persistence.
///
/// Implementations:
/// - `SqliteEmployeeStore`: SQLite storage
/// - `MemoryEmployeeStore`: in-memory storage for tests and standalone use
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Retrieve all employees.
    async fn get_all(&self) -> Result<Vec<Employee>>;

    /// Retrieve an employee by id.
    async fn get_by_id(&self, emp_id: Uuid) -> Result<Option<Employee>>;

    /// Persist a new employee, filling `created_at` when unset.
    async fn insert(&self, employee: Employee) -> Result<Employee>;

    /// Update an existing employee. Fails with `RowNotFound` if the id is
    /// absent.
    async fn update(&self, employee: &Employee) -> Result<Employee>;

    /// Delete an employee; returns whether a row was removed.
    async fn delete(&self, emp_id: Uuid) -> Result<bool>;

    /// Retrieve all employees assigned to an office, by office name.
    async fn get_by_office_name(&self, office_name: &str) -> Result<Vec<Employee>>;
}
