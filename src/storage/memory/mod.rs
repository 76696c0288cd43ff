//! In-memory storage implementations.
//!
//! Used as test doubles and as the zero-dependency `memory` storage type.
//! Records live in insertion order, matching the store-order guarantees of
//! the SQL backend.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    AdminStore, ClientStore, EmployeeStore, OfficeStore, QueueStore, RatingStore, Result,
    StoreError,
};
use crate::models::{Admin, Client, Employee, NewQueue, NewRating, Office, Queue, Rating};

fn unavailable() -> StoreError {
    StoreError::Unavailable("injected failure".to_string())
}

/// In-memory admin store.
#[derive(Default)]
pub struct MemoryAdminStore {
    admins: RwLock<Vec<Admin>>,
}

impl MemoryAdminStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdminStore for MemoryAdminStore {
    async fn get_all(&self) -> Result<Vec<Admin>> {
        Ok(self.admins.read().await.clone())
    }

    async fn get_by_id(&self, admin_id: Uuid) -> Result<Option<Admin>> {
        let admins = self.admins.read().await;
        Ok(admins.iter().find(|a| a.admin_id == admin_id).cloned())
    }

    async fn insert(&self, mut admin: Admin) -> Result<Admin> {
        admin.created_at = Some(admin.created_at.unwrap_or_else(Utc::now));
        self.admins.write().await.push(admin.clone());
        Ok(admin)
    }

    async fn update(&self, admin: &Admin) -> Result<Admin> {
        let mut admins = self.admins.write().await;
        match admins.iter_mut().find(|a| a.admin_id == admin.admin_id) {
            Some(slot) => {
                *slot = admin.clone();
                Ok(admin.clone())
            }
            None => Err(StoreError::row_not_found("admins", admin.admin_id)),
        }
    }

    async fn delete(&self, admin_id: Uuid) -> Result<bool> {
        let mut admins = self.admins.write().await;
        let before = admins.len();
        admins.retain(|a| a.admin_id != admin_id);
        Ok(admins.len() < before)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Admin>> {
        let admins = self.admins.read().await;
        Ok(admins.iter().find(|a| a.email_address == email).cloned())
    }
}

/// In-memory client store with failure injection for registration tests.
#[derive(Default)]
pub struct MemoryClientStore {
    clients: RwLock<Vec<Client>>,
    fail_on_insert: RwLock<bool>,
}

impl MemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_on_insert(&self, fail: bool) {
        *self.fail_on_insert.write().await = fail;
    }
}

#[async_trait]
impl ClientStore for MemoryClientStore {
    async fn get_all(&self) -> Result<Vec<Client>> {
        Ok(self.clients.read().await.clone())
    }

    async fn get_by_id(&self, client_id: Uuid) -> Result<Option<Client>> {
        let clients = self.clients.read().await;
        Ok(clients.iter().find(|c| c.client_id == client_id).cloned())
    }

    async fn insert(&self, mut client: Client) -> Result<Client> {
        if *self.fail_on_insert.read().await {
            return Err(unavailable());
        }
        client.created_at = Some(client.created_at.unwrap_or_else(Utc::now));
        self.clients.write().await.push(client.clone());
        Ok(client)
    }

    async fn update(&self, client: &Client) -> Result<Client> {
        let mut clients = self.clients.write().await;
        match clients.iter_mut().find(|c| c.client_id == client.client_id) {
            Some(slot) => {
                *slot = client.clone();
                Ok(client.clone())
            }
            None => Err(StoreError::row_not_found("clients", client.client_id)),
        }
    }

    async fn delete(&self, client_id: Uuid) -> Result<bool> {
        let mut clients = self.clients.write().await;
        let before = clients.len();
        clients.retain(|c| c.client_id != client_id);
        Ok(clients.len() < before)
    }
}

/// In-memory employee store.
#[derive(Default)]
pub struct MemoryEmployeeStore {
    employees: RwLock<Vec<Employee>>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn get_all(&self) -> Result<Vec<Employee>> {
        Ok(self.employees.read().await.clone())
    }

    async fn get_by_id(&self, emp_id: Uuid) -> Result<Option<Employee>> {
        let employees = self.employees.read().await;
        Ok(employees.iter().find(|e| e.emp_id == emp_id).cloned())
    }

    async fn insert(&self, mut employee: Employee) -> Result<Employee> {
        employee.created_at = Some(employee.created_at.unwrap_or_else(Utc::now));
        self.employees.write().await.push(employee.clone());
        Ok(employee)
    }

    async fn update(&self, employee: &Employee) -> Result<Employee> {
        let mut employees = self.employees.write().await;
        match employees.iter_mut().find(|e| e.emp_id == employee.emp_id) {
            Some(slot) => {
                *slot = employee.clone();
                Ok(employee.clone())
            }
            None => Err(StoreError::row_not_found("employees", employee.emp_id)),
        }
    }

    async fn delete(&self, emp_id: Uuid) -> Result<bool> {
        let mut employees = self.employees.write().await;
        let before = employees.len();
        employees.retain(|e| e.emp_id != emp_id);
        Ok(employees.len() < before)
    }

    async fn get_by_office_name(&self, office_name: &str) -> Result<Vec<Employee>> {
        let employees = self.employees.read().await;
        Ok(employees
            .iter()
            .filter(|e| e.office.as_deref() == Some(office_name))
            .cloned()
            .collect())
    }
}

/// In-memory office store.
#[derive(Default)]
pub struct MemoryOfficeStore {
    offices: RwLock<Vec<Office>>,
}

impl MemoryOfficeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OfficeStore for MemoryOfficeStore {
    async fn get_all(&self) -> Result<Vec<Office>> {
        Ok(self.offices.read().await.clone())
    }

    async fn get_by_id(&self, office_id: Uuid) -> Result<Option<Office>> {
        let offices = self.offices.read().await;
        Ok(offices.iter().find(|o| o.office_id == office_id).cloned())
    }

    async fn insert(&self, office: Office) -> Result<Office> {
        self.offices.write().await.push(office.clone());
        Ok(office)
    }

    async fn update(&self, office: &Office) -> Result<Office> {
        let mut offices = self.offices.write().await;
        match offices.iter_mut().find(|o| o.office_id == office.office_id) {
            Some(slot) => {
                *slot = office.clone();
                Ok(office.clone())
            }
            None => Err(StoreError::row_not_found("offices", office.office_id)),
        }
    }

    async fn delete(&self, office_id: Uuid) -> Result<bool> {
        let mut offices = self.offices.write().await;
        let before = offices.len();
        offices.retain(|o| o.office_id != office_id);
        Ok(offices.len() < before)
    }
}

/// In-memory queue store with a local id sequence and failure injection.
pub struct MemoryQueueStore {
    queues: RwLock<Vec<Queue>>,
    next_id: AtomicI64,
    fail_on_insert: RwLock<bool>,
    fail_on_update: RwLock<bool>,
}

impl Default for MemoryQueueStore {
    fn default() -> Self {
        Self {
            queues: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
            fail_on_insert: RwLock::new(false),
            fail_on_update: RwLock::new(false),
        }
    }
}

impl MemoryQueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_on_insert(&self, fail: bool) {
        *self.fail_on_insert.write().await = fail;
    }

    pub async fn set_fail_on_update(&self, fail: bool) {
        *self.fail_on_update.write().await = fail;
    }
}

#[async_trait]
impl QueueStore for MemoryQueueStore {
    async fn get_all(&self) -> Result<Vec<Queue>> {
        Ok(self.queues.read().await.clone())
    }

    async fn get_by_id(&self, queue_id: i64) -> Result<Option<Queue>> {
        let queues = self.queues.read().await;
        Ok(queues.iter().find(|q| q.queue_id == queue_id).cloned())
    }

    async fn insert(&self, queue: NewQueue) -> Result<Queue> {
        if *self.fail_on_insert.read().await {
            return Err(unavailable());
        }
        let queue = Queue {
            queue_id: self.next_id.fetch_add(1, Ordering::SeqCst),
            client_id: queue.client_id,
            created_at: Utc::now(),
            ended_at: None,
        };
        self.queues.write().await.push(queue.clone());
        Ok(queue)
    }

    async fn update(&self, queue: &Queue) -> Result<Queue> {
        if *self.fail_on_update.read().await {
            return Err(unavailable());
        }
        let mut queues = self.queues.write().await;
        match queues.iter_mut().find(|q| q.queue_id == queue.queue_id) {
            Some(slot) => {
                *slot = queue.clone();
                Ok(queue.clone())
            }
            None => Err(StoreError::row_not_found("queues", queue.queue_id)),
        }
    }

    async fn delete(&self, queue_id: i64) -> Result<bool> {
        let mut queues = self.queues.write().await;
        let before = queues.len();
        queues.retain(|q| q.queue_id != queue_id);
        Ok(queues.len() < before)
    }

    async fn get_active(&self) -> Result<Vec<Queue>> {
        let queues = self.queues.read().await;
        Ok(queues.iter().filter(|q| q.is_active()).cloned().collect())
    }

    async fn get_by_client(&self, client_id: Uuid) -> Result<Vec<Queue>> {
        let queues = self.queues.read().await;
        Ok(queues
            .iter()
            .filter(|q| q.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn get_by_created_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Queue>> {
        let queues = self.queues.read().await;
        Ok(queues
            .iter()
            .filter(|q| q.created_at >= start && q.created_at <= end)
            .cloned()
            .collect())
    }
}

/// In-memory rating store with failure injection.
#[derive(Default)]
pub struct MemoryRatingStore {
    ratings: RwLock<Vec<Rating>>,
    fail_on_get: RwLock<bool>,
}

impl MemoryRatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_on_get(&self, fail: bool) {
        *self.fail_on_get.write().await = fail;
    }
}

#[async_trait]
impl RatingStore for MemoryRatingStore {
    async fn get_all(&self) -> Result<Vec<Rating>> {
        if *self.fail_on_get.read().await {
            return Err(unavailable());
        }
        Ok(self.ratings.read().await.clone())
    }

    async fn get_by_id(&self, rating_id: Uuid) -> Result<Option<Rating>> {
        if *self.fail_on_get.read().await {
            return Err(unavailable());
        }
        let ratings = self.ratings.read().await;
        Ok(ratings.iter().find(|r| r.rating_id == rating_id).cloned())
    }

    async fn insert(&self, rating: NewRating) -> Result<Rating> {
        let rating = Rating {
            rating_id: Uuid::new_v4(),
            queue_id: rating.queue_id,
            emp_id: rating.emp_id,
            criteria: rating.criteria,
            comments: rating.comments,
            created_at: Utc::now(),
        };
        self.ratings.write().await.push(rating.clone());
        Ok(rating)
    }

    async fn update(&self, rating: &Rating) -> Result<Rating> {
        let mut ratings = self.ratings.write().await;
        match ratings.iter_mut().find(|r| r.rating_id == rating.rating_id) {
            Some(slot) => {
                *slot = rating.clone();
                Ok(rating.clone())
            }
            None => Err(StoreError::row_not_found("ratings", rating.rating_id)),
        }
    }

    async fn delete(&self, rating_id: Uuid) -> Result<bool> {
        let mut ratings = self.ratings.write().await;
        let before = ratings.len();
        ratings.retain(|r| r.rating_id != rating_id);
        Ok(ratings.len() < before)
    }

    async fn get_by_employee(&self, emp_id: Uuid) -> Result<Vec<Rating>> {
        if *self.fail_on_get.read().await {
            return Err(unavailable());
        }
        let ratings = self.ratings.read().await;
        Ok(ratings
            .iter()
            .filter(|r| r.emp_id == emp_id)
            .cloned()
            .collect())
    }

    async fn get_by_queue(&self, queue_id: i64) -> Result<Vec<Rating>> {
        if *self.fail_on_get.read().await {
            return Err(unavailable());
        }
        let ratings = self.ratings.read().await;
        Ok(ratings
            .iter()
            .filter(|r| r.queue_id == queue_id)
            .cloned()
            .collect())
    }

    async fn get_comments_by_employee(&self, emp_id: Uuid) -> Result<Vec<String>> {
        if *self.fail_on_get.read().await {
            return Err(unavailable());
        }
        let ratings = self.ratings.read().await;
        Ok(ratings
            .iter()
            .filter(|r| r.emp_id == emp_id)
            .filter_map(|r| r.comments.clone())
            .filter(|c| !c.is_empty())
            .collect())
    }
}
