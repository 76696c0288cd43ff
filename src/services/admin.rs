//! Admin directory and authentication.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::models::Admin;
use crate::storage::{AdminStore, Result};

/// Request-scoped authentication state.
///
/// Handlers receive this explicitly instead of reading ambient session
/// state; an anonymous context simply carries no admin.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    admin: Option<Admin>,
}

impl AuthContext {
    /// A context with no authenticated admin.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.admin.is_some()
    }

    pub fn admin(&self) -> Option<&Admin> {
        self.admin.as_ref()
    }
}

/// Admin CRUD plus the shared-secret login check.
#[derive(Clone)]
pub struct AdminService {
    admins: Arc<dyn AdminStore>,
    auth: AuthConfig,
}

impl AdminService {
    pub fn new(admins: Arc<dyn AdminStore>, auth: AuthConfig) -> Self {
        Self { admins, auth }
    }

    /// Check an email/access-code pair.
    ///
    /// Returns the admin only when the email resolves to a known admin
    /// AND the code matches the process-wide configured secret. Unknown
    /// email and wrong code are indistinguishable to the caller, so a
    /// failed login reveals nothing about which admins exist.
    pub async fn authenticate(&self, email: &str, access_code: &str) -> Result<Option<Admin>> {
        if !self.auth.is_enabled() {
            debug!("admin login disabled: no access code configured");
            return Ok(None);
        }

        match self.admins.get_by_email(email).await? {
            Some(admin) if access_code == self.auth.access_code => {
                info!(admin_id = %admin.admin_id, "admin authenticated");
                Ok(Some(admin))
            }
            _ => {
                debug!("admin authentication refused");
                Ok(None)
            }
        }
    }

    /// Run the login check and wrap the outcome in a request context.
    pub async fn login(&self, email: &str, access_code: &str) -> Result<AuthContext> {
        Ok(AuthContext {
            admin: self.authenticate(email, access_code).await?,
        })
    }

    pub async fn get_all(&self) -> Result<Vec<Admin>> {
        self.admins.get_all().await
    }

    pub async fn get_by_id(&self, admin_id: Uuid) -> Result<Option<Admin>> {
        self.admins.get_by_id(admin_id).await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<Admin>> {
        self.admins.get_by_email(email).await
    }

    pub async fn create(&self, admin: Admin) -> Result<Admin> {
        self.admins.insert(admin).await
    }

    pub async fn update(&self, admin: &Admin) -> Result<Admin> {
        self.admins.update(admin).await
    }

    pub async fn delete(&self, admin_id: Uuid) -> Result<bool> {
        self.admins.delete(admin_id).await
    }
}
