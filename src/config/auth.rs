//! Admin authentication configuration.

use serde::Deserialize;

/// Shared-secret admin access configuration.
///
/// The access code is process-wide, not per-admin. An empty code leaves
/// admin login disabled.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Access code required alongside a known admin email.
    pub access_code: String,
}

impl AuthConfig {
    /// Whether admin login is possible at all.
    pub fn is_enabled(&self) -> bool {
        !self.access_code.is_empty()
    }
}
