//! Rating aggregation.
//!
//! The single home of the average-rating computation: per-criterion
//! independent means recomputed from a full re-fetch on every call.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::models::{NewRating, Rating, Score};
use crate::storage::{RatingStore, Result};

/// How many employees `top_employees` returns at most.
const TOP_EMPLOYEE_LIMIT: usize = 3;

/// Per-criterion and overall average scores for one employee.
///
/// Each component is the arithmetic mean over the ratings where that
/// criterion was filled in; a criterion nobody scored reports `0.0`.
/// `overall` is the unweighted mean of the four components, NOT the mean
/// of all individual scores. `0.0` doubles as the no-data sentinel:
/// real scores live in 1..=5, so a criterion average of exactly `0.0`
/// means "no ratings", and callers ranking by `overall` must treat it
/// that way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AverageRating {
    pub first: f64,
    pub second: f64,
    pub third: f64,
    pub fourth: f64,
    pub overall: f64,
}

impl AverageRating {
    /// Whether at least one rating backs these numbers.
    pub fn has_data(&self) -> bool {
        self.overall > 0.0
    }
}

/// One entry of the top-employees board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TopEmployee {
    pub emp_id: Uuid,
    pub overall: f64,
}

/// Records ratings and computes per-employee aggregates.
#[derive(Clone)]
pub struct RatingService {
    ratings: Arc<dyn RatingStore>,
}

impl RatingService {
    pub fn new(ratings: Arc<dyn RatingStore>) -> Self {
        Self { ratings }
    }

    /// Record a rating for an employee during a queue visit.
    ///
    /// The queue and employee references are not validated here; a
    /// dangling reference simply never shows up in any aggregate.
    pub async fn create(&self, rating: NewRating) -> Result<Rating> {
        let rating = self.ratings.insert(rating).await?;
        debug!(
            rating_id = %rating.rating_id,
            queue_id = rating.queue_id,
            emp_id = %rating.emp_id,
            "rating recorded"
        );
        Ok(rating)
    }

    pub async fn get_all(&self) -> Result<Vec<Rating>> {
        self.ratings.get_all().await
    }

    pub async fn get_by_id(&self, rating_id: Uuid) -> Result<Option<Rating>> {
        self.ratings.get_by_id(rating_id).await
    }

    /// All ratings received by an employee.
    pub async fn get_by_employee(&self, emp_id: Uuid) -> Result<Vec<Rating>> {
        self.ratings.get_by_employee(emp_id).await
    }

    /// All ratings submitted during one queue visit.
    pub async fn get_by_queue(&self, queue_id: i64) -> Result<Vec<Rating>> {
        self.ratings.get_by_queue(queue_id).await
    }

    /// Compute an employee's average rating from all their ratings.
    ///
    /// Criteria are averaged independently: a rating that skipped the
    /// third criterion does not count toward the third denominator but
    /// still counts toward the others.
    pub async fn average_for_employee(&self, emp_id: Uuid) -> Result<AverageRating> {
        let ratings = self.ratings.get_by_employee(emp_id).await?;
        Ok(Self::average_of(&ratings))
    }

    /// Top rated employees out of the given pool, best first.
    ///
    /// Employees without any rating data (`overall == 0.0`) are excluded;
    /// ties keep the input order; at most three entries are returned.
    pub async fn top_employees(&self, employee_ids: &[Uuid]) -> Result<Vec<TopEmployee>> {
        let mut rated = Vec::new();
        for &emp_id in employee_ids {
            let average = self.average_for_employee(emp_id).await?;
            if average.has_data() {
                rated.push(TopEmployee {
                    emp_id,
                    overall: average.overall,
                });
            }
        }

        rated.sort_by(|a, b| b.overall.total_cmp(&a.overall));
        rated.truncate(TOP_EMPLOYEE_LIMIT);
        Ok(rated)
    }

    /// Non-empty comment texts for an employee, in store order, for
    /// downstream text analysis.
    pub async fn comments_for_employee(&self, emp_id: Uuid) -> Result<Vec<String>> {
        self.ratings.get_comments_by_employee(emp_id).await
    }

    fn average_of(ratings: &[Rating]) -> AverageRating {
        let first = Self::criterion_mean(ratings, |r| r.criteria.first);
        let second = Self::criterion_mean(ratings, |r| r.criteria.second);
        let third = Self::criterion_mean(ratings, |r| r.criteria.third);
        let fourth = Self::criterion_mean(ratings, |r| r.criteria.fourth);

        AverageRating {
            first,
            second,
            third,
            fourth,
            overall: (first + second + third + fourth) / 4.0,
        }
    }

    fn criterion_mean(ratings: &[Rating], criterion: impl Fn(&Rating) -> Option<Score>) -> f64 {
        let mut total = 0u32;
        let mut count = 0u32;
        for rating in ratings {
            if let Some(score) = criterion(rating) {
                total += u32::from(score.get());
                count += 1;
            }
        }

        if count > 0 {
            f64::from(total) / f64::from(count)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CriteriaScores;
    use crate::storage::{MemoryRatingStore, StoreError};

    fn service() -> (Arc<MemoryRatingStore>, RatingService) {
        let store = Arc::new(MemoryRatingStore::new());
        (store.clone(), RatingService::new(store))
    }

    fn score(value: u8) -> Option<Score> {
        Some(Score::new(value).unwrap())
    }

    async fn rate(
        service: &RatingService,
        emp_id: Uuid,
        criteria: CriteriaScores,
        comments: Option<&str>,
    ) {
        service
            .create(NewRating {
                queue_id: 1,
                emp_id,
                criteria,
                comments: comments.map(str::to_string),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_average_without_ratings_is_all_zero() {
        let (_, service) = service();
        let average = service.average_for_employee(Uuid::new_v4()).await.unwrap();

        assert_eq!(
            average,
            AverageRating {
                first: 0.0,
                second: 0.0,
                third: 0.0,
                fourth: 0.0,
                overall: 0.0,
            }
        );
        assert!(!average.has_data());
    }

    #[tokio::test]
    async fn test_average_with_empty_criteria_is_all_zero() {
        let (_, service) = service();
        let emp = Uuid::new_v4();

        rate(&service, emp, CriteriaScores::default(), None).await;
        rate(&service, emp, CriteriaScores::default(), None).await;

        let average = service.average_for_employee(emp).await.unwrap();
        assert_eq!(average.overall, 0.0);
    }

    #[tokio::test]
    async fn test_criteria_average_independently() {
        let (_, service) = service();
        let emp = Uuid::new_v4();

        // first: [4, 2], second: [5], third: absent, fourth: [3, 3]
        rate(
            &service,
            emp,
            CriteriaScores {
                first: score(4),
                second: score(5),
                third: None,
                fourth: score(3),
            },
            None,
        )
        .await;
        rate(
            &service,
            emp,
            CriteriaScores {
                first: score(2),
                second: None,
                third: None,
                fourth: score(3),
            },
            None,
        )
        .await;

        let average = service.average_for_employee(emp).await.unwrap();
        assert_eq!(average.first, 3.0);
        assert_eq!(average.second, 5.0);
        assert_eq!(average.third, 0.0);
        assert_eq!(average.fourth, 3.0);
        assert_eq!(average.overall, 2.75);
    }

    #[tokio::test]
    async fn test_top_employees_excludes_unrated_and_caps_at_three() {
        let (_, service) = service();
        let rated: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let unrated = Uuid::new_v4();

        for (i, &emp) in rated.iter().enumerate() {
            rate(
                &service,
                emp,
                CriteriaScores {
                    first: score(i as u8 + 1),
                    ..Default::default()
                },
                None,
            )
            .await;
        }

        let mut pool = rated.clone();
        pool.push(unrated);

        let top = service.top_employees(&pool).await.unwrap();
        assert_eq!(top.len(), 3);
        assert!(top.iter().all(|t| t.overall > 0.0));
        assert!(top.windows(2).all(|w| w[0].overall >= w[1].overall));
        // Best first: the employee rated 4 on the first criterion.
        assert_eq!(top[0].emp_id, rated[3]);
        assert!(!top.iter().any(|t| t.emp_id == unrated));
    }

    #[tokio::test]
    async fn test_top_employees_ties_keep_input_order() {
        let (_, service) = service();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        for emp in [a, b] {
            rate(
                &service,
                emp,
                CriteriaScores {
                    first: score(4),
                    ..Default::default()
                },
                None,
            )
            .await;
        }

        let top = service.top_employees(&[a, b]).await.unwrap();
        assert_eq!(top.iter().map(|t| t.emp_id).collect::<Vec<_>>(), vec![a, b]);
    }

    #[tokio::test]
    async fn test_comments_in_store_order() {
        let (_, service) = service();
        let emp = Uuid::new_v4();

        rate(&service, emp, CriteriaScores::default(), Some("quick")).await;
        rate(&service, emp, CriteriaScores::default(), None).await;
        rate(&service, emp, CriteriaScores::default(), Some("helpful")).await;

        let comments = service.comments_for_employee(emp).await.unwrap();
        assert_eq!(comments, vec!["quick", "helpful"]);
    }

    #[tokio::test]
    async fn test_average_surfaces_store_failure() {
        let (store, service) = service();
        store.set_fail_on_get(true).await;

        let err = service.average_for_employee(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
