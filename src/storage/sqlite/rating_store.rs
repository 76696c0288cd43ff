//! SQLite RatingStore implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_query::{Expr, Query, SqliteQueryBuilder};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{parse_score, parse_ts, parse_uuid};
use crate::models::{CriteriaScores, NewRating, Rating};
use crate::storage::schema::{Ratings, CREATE_RATINGS_TABLE};
use crate::storage::{RatingStore, Result, StoreError};

const ALL_COLUMNS: [Ratings; 9] = [
    Ratings::RatingId,
    Ratings::QueueId,
    Ratings::EmpId,
    Ratings::FirstCriteria,
    Ratings::SecondCriteria,
    Ratings::ThirdCriteria,
    Ratings::FourthCriteria,
    Ratings::Comments,
    Ratings::CreatedAt,
];

/// SQLite implementation of RatingStore.
pub struct SqliteRatingStore {
    pool: SqlitePool,
}

impl SqliteRatingStore {
    /// Create a new SQLite rating store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the database schema.
    pub async fn init(&self) -> Result<()> {
        sqlx::raw_sql(CREATE_RATINGS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    fn from_row(row: &SqliteRow) -> Result<Rating> {
        let rating_id: String = row.get("rating_id");
        let emp_id: String = row.get("emp_id");
        let created_at: String = row.get("created_at");
        Ok(Rating {
            rating_id: parse_uuid(&rating_id)?,
            queue_id: row.get("queue_id"),
            emp_id: parse_uuid(&emp_id)?,
            criteria: CriteriaScores {
                first: parse_score(row.get("first_criteria"))?,
                second: parse_score(row.get("second_criteria"))?,
                third: parse_score(row.get("third_criteria"))?,
                fourth: parse_score(row.get("fourth_criteria"))?,
            },
            comments: row.get("comments"),
            created_at: parse_ts(&created_at)?,
        })
    }

    async fn fetch_where(&self, query: String) -> Result<Vec<Rating>> {
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        rows.iter().map(Self::from_row).collect()
    }
}

#[async_trait]
impl RatingStore for SqliteRatingStore {
    async fn get_all(&self) -> Result<Vec<Rating>> {
        let query = Query::select()
            .columns(ALL_COLUMNS)
            .from(Ratings::Table)
            .to_string(SqliteQueryBuilder);

        self.fetch_where(query).await
    }

    async fn get_by_id(&self, rating_id: Uuid) -> Result<Option<Rating>> {
        let query = Query::select()
            .columns(ALL_COLUMNS)
            .from(Ratings::Table)
            .and_where(Expr::col(Ratings::RatingId).eq(rating_id.to_string()))
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query).fetch_optional(&self.pool).await?;
        row.as_ref().map(Self::from_row).transpose()
    }

    async fn insert(&self, rating: NewRating) -> Result<Rating> {
        let rating_id = Uuid::new_v4();
        let created_at = Utc::now();

        let query = Query::insert()
            .into_table(Ratings::Table)
            .columns(ALL_COLUMNS)
            .values_panic([
                rating_id.to_string().into(),
                rating.queue_id.into(),
                rating.emp_id.to_string().into(),
                rating.criteria.first.map(|s| s.get() as i64).into(),
                rating.criteria.second.map(|s| s.get() as i64).into(),
                rating.criteria.third.map(|s| s.get() as i64).into(),
                rating.criteria.fourth.map(|s| s.get() as i64).into(),
                rating.comments.into(),
                created_at.to_rfc3339().into(),
            ])
            .to_string(SqliteQueryBuilder);

        sqlx::query(&query).execute(&self.pool).await?;

        self.get_by_id(rating_id)
            .await?
            .ok_or_else(|| StoreError::row_not_found("ratings", rating_id))
    }

    async fn update(&self, rating: &Rating) -> Result<Rating> {
        let query = Query::update()
            .table(Ratings::Table)
            .values([
                (Ratings::QueueId, rating.queue_id.into()),
                (Ratings::EmpId, rating.emp_id.to_string().into()),
                (
                    Ratings::FirstCriteria,
                    rating.criteria.first.map(|s| s.get() as i64).into(),
                ),
                (
                    Ratings::SecondCriteria,
                    rating.criteria.second.map(|s| s.get() as i64).into(),
                ),
                (
                    Ratings::ThirdCriteria,
                    rating.criteria.third.map(|s| s.get() as i64).into(),
                ),
                (
                    Ratings::FourthCriteria,
                    rating.criteria.fourth.map(|s| s.get() as i64).into(),
                ),
                (Ratings::Comments, rating.comments.clone().into()),
                (Ratings::CreatedAt, rating.created_at.to_rfc3339().into()),
            ])
            .and_where(Expr::col(Ratings::RatingId).eq(rating.rating_id.to_string()))
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::row_not_found("ratings", rating.rating_id));
        }

        self.get_by_id(rating.rating_id)
            .await?
            .ok_or_else(|| StoreError::row_not_found("ratings", rating.rating_id))
    }

    async fn delete(&self, rating_id: Uuid) -> Result<bool> {
        let query = Query::delete()
            .from_table(Ratings::Table)
            .and_where(Expr::col(Ratings::RatingId).eq(rating_id.to_string()))
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_by_employee(&self, emp_id: Uuid) -> Result<Vec<Rating>> {
        let query = Query::select()
            .columns(ALL_COLUMNS)
            .from(Ratings::Table)
            .and_where(Expr::col(Ratings::EmpId).eq(emp_id.to_string()))
            .to_string(SqliteQueryBuilder);

        self.fetch_where(query).await
    }

    async fn get_by_queue(&self, queue_id: i64) -> Result<Vec<Rating>> {
        let query = Query::select()
            .columns(ALL_COLUMNS)
            .from(Ratings::Table)
            .and_where(Expr::col(Ratings::QueueId).eq(queue_id))
            .to_string(SqliteQueryBuilder);

        self.fetch_where(query).await
    }

    async fn get_comments_by_employee(&self, emp_id: Uuid) -> Result<Vec<String>> {
        let query = Query::select()
            .column(Ratings::Comments)
            .from(Ratings::Table)
            .and_where(Expr::col(Ratings::EmpId).eq(emp_id.to_string()))
            .and_where(Expr::col(Ratings::Comments).is_not_null())
            .to_string(SqliteQueryBuilder);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        Ok(rows
            .iter()
            .map(|row| row.get::<String, _>("comments"))
            .filter(|c| !c.is_empty())
            .collect())
    }
}
