//! Service layer over the entity stores.

pub mod admin;
pub mod client;
pub mod employee;
pub mod queue;
pub mod rating;

pub use admin::{AdminService, AuthContext};
pub use client::{ClientService, Registration, RegistrationError};
pub use employee::{EmployeeService, OfficeMetrics, RankedEmployee};
pub use queue::{QueueError, QueueService};
pub use rating::{AverageRating, RatingService, TopEmployee};

use crate::config::Config;
use crate::storage::Stores;

/// All services wired over one store set.
///
/// The presentation layer builds this once and calls into the fields.
#[derive(Clone)]
pub struct Services {
    pub admins: AdminService,
    pub clients: ClientService,
    pub employees: EmployeeService,
    pub queues: QueueService,
    pub ratings: RatingService,
}

impl Services {
    pub fn new(stores: &Stores, config: &Config) -> Self {
        let queues = QueueService::new(stores.queues.clone());
        let ratings = RatingService::new(stores.ratings.clone());

        Self {
            admins: AdminService::new(stores.admins.clone(), config.auth.clone()),
            clients: ClientService::new(stores.clients.clone(), queues.clone()),
            employees: EmployeeService::new(
                stores.employees.clone(),
                stores.offices.clone(),
                ratings.clone(),
            ),
            queues,
            ratings,
        }
    }
}
