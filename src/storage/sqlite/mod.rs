//! SQLite implementations of storage interfaces.

mod admin_store;
mod client_store;
mod employee_store;
mod office_store;
mod queue_store;
mod rating_store;

pub use admin_store::SqliteAdminStore;
pub use client_store::SqliteClientStore;
pub use employee_store::SqliteEmployeeStore;
pub use office_store::SqliteOfficeStore;
pub use queue_store::SqliteQueueStore;
pub use rating_store::SqliteRatingStore;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::Result;
use crate::models::Score;

/// Parse an RFC 3339 TEXT column into a UTC timestamp.
fn parse_ts(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

/// Parse a nullable RFC 3339 TEXT column.
fn parse_opt_ts(value: Option<String>) -> Result<Option<DateTime<Utc>>> {
    value.as_deref().map(parse_ts).transpose()
}

/// Parse a TEXT uuid column.
fn parse_uuid(value: &str) -> Result<Uuid> {
    Ok(Uuid::parse_str(value)?)
}

/// Map a nullable INTEGER criteria column back into the 1..=5 domain.
fn parse_score(value: Option<i64>) -> Result<Option<Score>> {
    value
        .map(|v| {
            let byte = u8::try_from(v).unwrap_or(u8::MAX);
            Ok(Score::new(byte)?)
        })
        .transpose()
}
