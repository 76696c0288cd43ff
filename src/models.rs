//! Domain entities persisted through the storage layer.
//!
//! Ids are caller-assigned UUIDs except for `Queue`, whose id is a
//! store-assigned sequence number, and `Rating`, whose id is generated at
//! insert time. Timestamps are UTC; stores fill `created_at` when the
//! caller leaves it unset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An administrator account, identified by email for authentication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub admin_id: Uuid,
    pub email_address: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A citizen registering at the kiosk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub client_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// A service employee who can be rated.
///
/// `office` holds the office name; resolution from office id to name goes
/// through the office store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub emp_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub office: Option<String>,
    pub position: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A service office grouping employees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Office {
    pub office_id: Uuid,
    pub name: String,
}

/// A queue ticket tracking one client's wait/service window.
///
/// `ended_at = None` means the ticket is open. Once set, `ended_at` is
/// never unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Queue {
    /// Store-assigned sequence number, shown to the client as their
    /// queue number.
    pub queue_id: i64,
    pub client_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Queue {
    /// Whether the ticket is still open.
    pub fn is_active(&self) -> bool {
        self.ended_at.is_none()
    }
}

/// Insert payload for a queue ticket; id and `created_at` are assigned by
/// the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQueue {
    pub client_id: Uuid,
}

/// A single criterion score, restricted to the 1..=5 domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

/// A score value outside the 1..=5 domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("score {0} outside {min}..={max}", min = Score::MIN, max = Score::MAX)]
pub struct InvalidScore(pub u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Construct a score, rejecting values outside 1..=5.
    pub fn new(value: u8) -> Result<Self, InvalidScore> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidScore(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Score {
    type Error = InvalidScore;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> u8 {
        score.0
    }
}

/// The four independent rating dimensions of a visit.
///
/// Each slot is optional; an absent slot does not count toward that
/// criterion's average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaScores {
    pub first: Option<Score>,
    pub second: Option<Score>,
    pub third: Option<Score>,
    pub fourth: Option<Score>,
}

impl CriteriaScores {
    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none() && self.third.is_none() && self.fourth.is_none()
    }
}

/// A rating of one employee during one queue visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rating_id: Uuid,
    pub queue_id: i64,
    pub emp_id: Uuid,
    pub criteria: CriteriaScores,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a rating; id and `created_at` are assigned by the
/// store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRating {
    pub queue_id: i64,
    pub emp_id: Uuid,
    pub criteria: CriteriaScores,
    pub comments: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_accepts_bounds() {
        assert_eq!(Score::new(1).unwrap().get(), 1);
        assert_eq!(Score::new(5).unwrap().get(), 5);
    }

    #[test]
    fn score_rejects_out_of_domain() {
        assert_eq!(Score::new(0), Err(InvalidScore(0)));
        assert_eq!(Score::new(6), Err(InvalidScore(6)));
    }

    #[test]
    fn score_serde_round_trip() {
        let score: Score = serde_json::from_str("4").unwrap();
        assert_eq!(score, Score::new(4).unwrap());
        assert!(serde_json::from_str::<Score>("9").is_err());
    }

    #[test]
    fn criteria_emptiness() {
        assert!(CriteriaScores::default().is_empty());
        let partial = CriteriaScores {
            second: Score::new(3).ok(),
            ..Default::default()
        };
        assert!(!partial.is_empty());
    }
}
