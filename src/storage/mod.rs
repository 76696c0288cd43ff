//! Storage interfaces and implementations.

use std::sync::Arc;

use tracing::info;

use crate::config::{StorageConfig, StorageType};

mod admin_store;
mod client_store;
mod employee_store;
mod error;
mod office_store;
mod queue_store;
mod rating_store;

pub mod memory;

#[cfg(feature = "sqlite")]
pub mod schema;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use admin_store::AdminStore;
pub use client_store::ClientStore;
pub use employee_store::EmployeeStore;
pub use error::{Result, StoreError};
pub use office_store::OfficeStore;
pub use queue_store::QueueStore;
pub use rating_store::RatingStore;

pub use memory::{
    MemoryAdminStore, MemoryClientStore, MemoryEmployeeStore, MemoryOfficeStore, MemoryQueueStore,
    MemoryRatingStore,
};

#[cfg(feature = "sqlite")]
pub use sqlite::{
    SqliteAdminStore, SqliteClientStore, SqliteEmployeeStore, SqliteOfficeStore, SqliteQueueStore,
    SqliteRatingStore,
};

/// The per-entity store handles consumed by the service layer.
#[derive(Clone)]
pub struct Stores {
    pub admins: Arc<dyn AdminStore>,
    pub clients: Arc<dyn ClientStore>,
    pub employees: Arc<dyn EmployeeStore>,
    pub offices: Arc<dyn OfficeStore>,
    pub queues: Arc<dyn QueueStore>,
    pub ratings: Arc<dyn RatingStore>,
}

impl Stores {
    /// Build a fully in-memory store set. Used by tests and the `memory`
    /// storage type.
    pub fn in_memory() -> Self {
        Self {
            admins: Arc::new(MemoryAdminStore::new()),
            clients: Arc::new(MemoryClientStore::new()),
            employees: Arc::new(MemoryEmployeeStore::new()),
            offices: Arc::new(MemoryOfficeStore::new()),
            queues: Arc::new(MemoryQueueStore::new()),
            ratings: Arc::new(MemoryRatingStore::new()),
        }
    }
}

/// Initialize storage based on configuration.
///
/// Returns the store set for the configured backend, running schema
/// setup where the backend needs it.
pub async fn init_storage(config: &StorageConfig) -> std::result::Result<Stores, Box<dyn std::error::Error>> {
    info!("Storage: {:?} at {}", config.storage_type, config.path);

    match config.storage_type {
        #[cfg(feature = "sqlite")]
        StorageType::Sqlite => {
            if let Some(parent) = std::path::Path::new(&config.path).parent() {
                std::fs::create_dir_all(parent)?;
            }

            let pool =
                sqlx::SqlitePool::connect(&format!("sqlite:{}?mode=rwc", config.path)).await?;

            let admins = SqliteAdminStore::new(pool.clone());
            admins.init().await?;
            let clients = SqliteClientStore::new(pool.clone());
            clients.init().await?;
            let employees = SqliteEmployeeStore::new(pool.clone());
            employees.init().await?;
            let offices = SqliteOfficeStore::new(pool.clone());
            offices.init().await?;
            let queues = SqliteQueueStore::new(pool.clone());
            queues.init().await?;
            let ratings = SqliteRatingStore::new(pool);
            ratings.init().await?;

            Ok(Stores {
                admins: Arc::new(admins),
                clients: Arc::new(clients),
                employees: Arc::new(employees),
                offices: Arc::new(offices),
                queues: Arc::new(queues),
                ratings: Arc::new(ratings),
            })
        }
        #[cfg(not(feature = "sqlite"))]
        StorageType::Sqlite => {
            tracing::error!("SQLite storage requested but 'sqlite' feature is not enabled");
            Err("SQLite feature not enabled".into())
        }
        StorageType::Memory => Ok(Stores::in_memory()),
    }
}
