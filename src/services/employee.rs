//! Office and employee metrics facade.
//!
//! Composes employee records with rating aggregates for the dashboard
//! views.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use super::rating::{AverageRating, RatingService};
use crate::models::{Employee, Office};
use crate::storage::{EmployeeStore, OfficeStore, Result};

/// Aggregate metrics for one office.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OfficeMetrics {
    pub num_employees: usize,
    /// Mean of the employees' overall averages, counting only employees
    /// with rating data. `None` renders as "N/A".
    pub average_rating: Option<f64>,
    /// Office rank. Never computed; carried as an explicit placeholder so
    /// dashboards render "N/A" rather than an invented ranking.
    pub rank: Option<u32>,
}

impl OfficeMetrics {
    fn empty() -> Self {
        Self {
            num_employees: 0,
            average_rating: None,
            rank: None,
        }
    }
}

/// One row of the employee ranking board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedEmployee {
    pub emp_id: Uuid,
    pub average: AverageRating,
    /// 1-based position by overall average, best first.
    pub rank: u32,
}

/// Employee directory plus dashboard aggregates.
#[derive(Clone)]
pub struct EmployeeService {
    employees: Arc<dyn EmployeeStore>,
    offices: Arc<dyn OfficeStore>,
    ratings: RatingService,
}

impl EmployeeService {
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        offices: Arc<dyn OfficeStore>,
        ratings: RatingService,
    ) -> Self {
        Self {
            employees,
            offices,
            ratings,
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Employee>> {
        self.employees.get_all().await
    }

    pub async fn get_by_id(&self, emp_id: Uuid) -> Result<Option<Employee>> {
        self.employees.get_by_id(emp_id).await
    }

    pub async fn create(&self, employee: Employee) -> Result<Employee> {
        self.employees.insert(employee).await
    }

    pub async fn update(&self, employee: &Employee) -> Result<Employee> {
        self.employees.update(employee).await
    }

    pub async fn delete(&self, emp_id: Uuid) -> Result<bool> {
        self.employees.delete(emp_id).await
    }

    /// Employees assigned to an office, resolved by office id.
    ///
    /// An unknown office reads as empty, matching the "no data" rendering
    /// of the dashboards.
    pub async fn get_by_office(&self, office_id: Uuid) -> Result<Vec<Employee>> {
        match self.offices.get_by_id(office_id).await? {
            Some(office) => self.employees.get_by_office_name(&office.name).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn get_by_office_name(&self, office_name: &str) -> Result<Vec<Employee>> {
        self.employees.get_by_office_name(office_name).await
    }

    pub async fn get_all_offices(&self) -> Result<Vec<Office>> {
        self.offices.get_all().await
    }

    /// Aggregate metrics for one office.
    ///
    /// `average_rating` counts only employees whose overall average is
    /// backed by data; an office with no employees (or an unknown office
    /// id) reports the empty metrics.
    pub async fn office_metrics(&self, office_id: Uuid) -> Result<OfficeMetrics> {
        let employees = self.get_by_office(office_id).await?;
        let num_employees = employees.len();
        if num_employees == 0 {
            return Ok(OfficeMetrics::empty());
        }

        let mut total = 0.0;
        let mut rated = 0u32;
        for employee in &employees {
            let average = self.ratings.average_for_employee(employee.emp_id).await?;
            total += average.overall;
            if average.has_data() {
                rated += 1;
            }
        }

        let average_rating = (rated > 0).then(|| total / f64::from(rated));

        Ok(OfficeMetrics {
            num_employees,
            average_rating,
            rank: None,
        })
    }

    /// Rank all employees by overall average, best first, 1-based.
    ///
    /// Unlike `RatingService::top_employees`, the pool includes employees
    /// without any rating data; they sort to the bottom with the 0.0
    /// sentinel as their overall. Ties keep store order.
    pub async fn rank_all(&self) -> Result<Vec<RankedEmployee>> {
        let employees = self.employees.get_all().await?;

        let mut board = Vec::with_capacity(employees.len());
        for employee in &employees {
            let average = self.ratings.average_for_employee(employee.emp_id).await?;
            board.push((employee.emp_id, average));
        }

        board.sort_by(|a, b| b.1.overall.total_cmp(&a.1.overall));

        Ok(board
            .into_iter()
            .enumerate()
            .map(|(i, (emp_id, average))| RankedEmployee {
                emp_id,
                average,
                rank: i as u32 + 1,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CriteriaScores, NewRating, Score};
    use crate::storage::{MemoryEmployeeStore, MemoryOfficeStore, MemoryRatingStore};

    struct Fixture {
        employees: Arc<MemoryEmployeeStore>,
        offices: Arc<MemoryOfficeStore>,
        ratings: RatingService,
        service: EmployeeService,
    }

    fn fixture() -> Fixture {
        let employees = Arc::new(MemoryEmployeeStore::new());
        let offices = Arc::new(MemoryOfficeStore::new());
        let rating_store = Arc::new(MemoryRatingStore::new());
        let ratings = RatingService::new(rating_store);
        let service = EmployeeService::new(employees.clone(), offices.clone(), ratings.clone());
        Fixture {
            employees,
            offices,
            ratings,
            service,
        }
    }

    async fn add_office(fixture: &Fixture, name: &str) -> Office {
        fixture
            .offices
            .insert(Office {
                office_id: Uuid::new_v4(),
                name: name.to_string(),
            })
            .await
            .unwrap()
    }

    async fn add_employee(fixture: &Fixture, office: Option<&str>) -> Employee {
        fixture
            .employees
            .insert(Employee {
                emp_id: Uuid::new_v4(),
                first_name: "Alex".to_string(),
                last_name: "Reyes".to_string(),
                office: office.map(str::to_string),
                position: None,
                created_at: None,
            })
            .await
            .unwrap()
    }

    async fn rate(fixture: &Fixture, emp_id: Uuid, value: u8) {
        fixture
            .ratings
            .create(NewRating {
                queue_id: 1,
                emp_id,
                criteria: CriteriaScores {
                    first: Score::new(value).ok(),
                    second: Score::new(value).ok(),
                    third: Score::new(value).ok(),
                    fourth: Score::new(value).ok(),
                },
                comments: None,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_office_metrics_empty_office() {
        let fixture = fixture();
        let office = add_office(&fixture, "Registry").await;

        let metrics = fixture.service.office_metrics(office.office_id).await.unwrap();
        assert_eq!(metrics.num_employees, 0);
        assert_eq!(metrics.average_rating, None);
        assert_eq!(metrics.rank, None);
    }

    #[tokio::test]
    async fn test_office_metrics_unknown_office() {
        let fixture = fixture();
        let metrics = fixture.service.office_metrics(Uuid::new_v4()).await.unwrap();
        assert_eq!(metrics.num_employees, 0);
        assert_eq!(metrics.average_rating, None);
    }

    #[tokio::test]
    async fn test_office_metrics_counts_only_rated_employees() {
        let fixture = fixture();
        let office = add_office(&fixture, "Permits").await;

        let rated = add_employee(&fixture, Some("Permits")).await;
        let _unrated = add_employee(&fixture, Some("Permits")).await;
        add_employee(&fixture, Some("Archives")).await;

        rate(&fixture, rated.emp_id, 4).await;

        let metrics = fixture.service.office_metrics(office.office_id).await.unwrap();
        assert_eq!(metrics.num_employees, 2);
        // Only the rated employee contributes to the office average.
        assert_eq!(metrics.average_rating, Some(4.0));
        assert_eq!(metrics.rank, None);
    }

    #[tokio::test]
    async fn test_office_metrics_all_unrated() {
        let fixture = fixture();
        let office = add_office(&fixture, "Permits").await;
        add_employee(&fixture, Some("Permits")).await;

        let metrics = fixture.service.office_metrics(office.office_id).await.unwrap();
        assert_eq!(metrics.num_employees, 1);
        assert_eq!(metrics.average_rating, None);
    }

    #[tokio::test]
    async fn test_rank_all_includes_unrated_employees() {
        let fixture = fixture();
        let best = add_employee(&fixture, None).await;
        let middle = add_employee(&fixture, None).await;
        let unrated = add_employee(&fixture, None).await;

        rate(&fixture, best.emp_id, 5).await;
        rate(&fixture, middle.emp_id, 2).await;

        let board = fixture.service.rank_all().await.unwrap();
        assert_eq!(board.len(), 3);

        assert_eq!(board[0].emp_id, best.emp_id);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[1].emp_id, middle.emp_id);
        assert_eq!(board[1].rank, 2);
        // The unrated employee stays in the pool, ranked last on the
        // 0.0 sentinel.
        assert_eq!(board[2].emp_id, unrated.emp_id);
        assert_eq!(board[2].rank, 3);
        assert!(!board[2].average.has_data());
    }
}
