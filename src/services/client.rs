//! Client registration.
//!
//! Registration creates the client record and mints their queue ticket
//! in one step; the ticket's id is the number shown on the kiosk screen.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::queue::{QueueError, QueueService};
use crate::models::{Client, Queue};
use crate::storage::{ClientStore, Result, StoreError};

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub client: Client,
    /// The freshly minted ticket; `queue.queue_id` is the displayable
    /// queue number.
    pub queue: Queue,
}

/// Errors from the registration flow.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("failed to persist client: {0}")]
    Client(#[source] StoreError),

    /// The client row exists but no ticket could be minted for it.
    #[error("client {client_id} registered but no queue could be created: {source}")]
    Queue {
        client_id: Uuid,
        #[source]
        source: QueueError,
    },
}

/// Client directory and registration entry point.
#[derive(Clone)]
pub struct ClientService {
    clients: Arc<dyn ClientStore>,
    queues: QueueService,
}

impl ClientService {
    pub fn new(clients: Arc<dyn ClientStore>, queues: QueueService) -> Self {
        Self { clients, queues }
    }

    /// Register a client and mint their queue ticket.
    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> std::result::Result<Registration, RegistrationError> {
        let client = self
            .clients
            .insert(Client {
                client_id: Uuid::new_v4(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                created_at: None,
            })
            .await
            .map_err(RegistrationError::Client)?;

        let queue = self
            .queues
            .create(client.client_id)
            .await
            .map_err(|source| RegistrationError::Queue {
                client_id: client.client_id,
                source,
            })?;

        info!(
            client_id = %client.client_id,
            queue_id = queue.queue_id,
            "client registered"
        );

        Ok(Registration { client, queue })
    }

    pub async fn get_all(&self) -> Result<Vec<Client>> {
        self.clients.get_all().await
    }

    pub async fn get_by_id(&self, client_id: Uuid) -> Result<Option<Client>> {
        self.clients.get_by_id(client_id).await
    }

    pub async fn update(&self, client: &Client) -> Result<Client> {
        self.clients.update(client).await
    }

    pub async fn delete(&self, client_id: Uuid) -> Result<bool> {
        self.clients.delete(client_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryClientStore, MemoryQueueStore, QueueStore};

    struct Fixture {
        clients: Arc<MemoryClientStore>,
        queues: Arc<MemoryQueueStore>,
        service: ClientService,
    }

    fn fixture() -> Fixture {
        let clients = Arc::new(MemoryClientStore::new());
        let queues = Arc::new(MemoryQueueStore::new());
        let service = ClientService::new(clients.clone(), QueueService::new(queues.clone()));
        Fixture {
            clients,
            queues,
            service,
        }
    }

    #[tokio::test]
    async fn test_register_mints_one_open_queue() {
        let fixture = fixture();

        let registration = fixture.service.register("Ana", "Costa").await.unwrap();
        assert_eq!(registration.queue.client_id, registration.client.client_id);
        assert!(registration.queue.is_active());
        assert!(registration.client.created_at.is_some());

        let open = fixture.queues.get_active().await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].queue_id, registration.queue.queue_id);
    }

    #[tokio::test]
    async fn test_register_fails_when_client_write_fails() {
        let fixture = fixture();
        fixture.clients.set_fail_on_insert(true).await;

        let err = fixture.service.register("Ana", "Costa").await.unwrap_err();
        assert!(matches!(err, RegistrationError::Client(_)));

        // No orphan ticket.
        assert!(fixture.queues.get_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_reports_queue_failure_with_client_id() {
        let fixture = fixture();
        fixture.queues.set_fail_on_insert(true).await;

        let err = fixture.service.register("Ana", "Costa").await.unwrap_err();
        let RegistrationError::Queue { client_id, .. } = err else {
            panic!("expected Queue failure");
        };

        // The partial client row is reported, not hidden.
        let stored = fixture.service.get_by_id(client_id).await.unwrap();
        assert!(stored.is_some());
    }
}
