//! SQLite QueueStore implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_query::{Expr, Query, SqliteQueryBuilder};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{parse_opt_ts, parse_ts, parse_uuid};
use crate::models::{NewQueue, Queue};
use crate::storage::schema::{Queues, CREATE_QUEUES_TABLE};
use crate::storage::{QueueStore, Result, StoreError};

/// SQLite implementation of QueueStore.
pub struct SqliteQueueStore {
    pool: SqlitePool,
}

impl SqliteQueueStore {
    /// Create a new SQLite queue store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the database schema.
    pub async fn init(&self) -> Result<()> {
        sqlx::raw_sql(CREATE_QUEUES_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    fn from_row(row: &SqliteRow) -> Result<Queue> {
        let client_id: String = row.get("client_id");
        let created_at: String = row.get("created_at");
        Ok(Queue {
            queue_id: row.get("queue_id"),
            client_id: parse_uuid(&client_id)?,
            created_at: parse_ts(&created_at)?,
            ended_at: parse_opt_ts(row.get("ended_at"))?,
        })
    }

    async fn fetch_where(&self, query: String) -> Result<Vec<Queue>> {
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        rows.iter().map(Self::from_row).collect()
    }
}

#[async_trait]
impl QueueStore for SqliteQueueStore {
    async fn get_all(&self) -> Result<Vec<Queue>> {
        let query = Query::select()
            .columns([
                Queues::QueueId,
                Queues::ClientId,
                Queues::CreatedAt,
                Queues::EndedAt,
            ])
            .from(Queues::Table)
            .to_string(SqliteQueryBuilder);

        self.fetch_where(query).await
    }

    async fn get_by_id(&self, queue_id: i64) -> Result<Option<Queue>> {
        let query = Query::select()
            .columns([
                Queues::QueueId,
                Queues::ClientId,
                Queues::CreatedAt,
                Queues::EndedAt,
            ])
            .from(Queues::Table)
            .and_where(Expr::col(Queues::QueueId).eq(queue_id))
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query).fetch_optional(&self.pool).await?;
        row.as_ref().map(Self::from_row).transpose()
    }

    async fn insert(&self, queue: NewQueue) -> Result<Queue> {
        let created_at = Utc::now();

        let query = Query::insert()
            .into_table(Queues::Table)
            .columns([Queues::ClientId, Queues::CreatedAt])
            .values_panic([
                queue.client_id.to_string().into(),
                created_at.to_rfc3339().into(),
            ])
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&self.pool).await?;
        let queue_id = result.last_insert_rowid();

        self.get_by_id(queue_id)
            .await?
            .ok_or_else(|| StoreError::row_not_found("queues", queue_id))
    }

    async fn update(&self, queue: &Queue) -> Result<Queue> {
        let query = Query::update()
            .table(Queues::Table)
            .values([
                (Queues::ClientId, queue.client_id.to_string().into()),
                (Queues::CreatedAt, queue.created_at.to_rfc3339().into()),
                (
                    Queues::EndedAt,
                    queue.ended_at.map(|t| t.to_rfc3339()).into(),
                ),
            ])
            .and_where(Expr::col(Queues::QueueId).eq(queue.queue_id))
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::row_not_found("queues", queue.queue_id));
        }

        self.get_by_id(queue.queue_id)
            .await?
            .ok_or_else(|| StoreError::row_not_found("queues", queue.queue_id))
    }

    async fn delete(&self, queue_id: i64) -> Result<bool> {
        let query = Query::delete()
            .from_table(Queues::Table)
            .and_where(Expr::col(Queues::QueueId).eq(queue_id))
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_active(&self) -> Result<Vec<Queue>> {
        let query = Query::select()
            .columns([
                Queues::QueueId,
                Queues::ClientId,
                Queues::CreatedAt,
                Queues::EndedAt,
            ])
            .from(Queues::Table)
            .and_where(Expr::col(Queues::EndedAt).is_null())
            .to_string(SqliteQueryBuilder);

        self.fetch_where(query).await
    }

    async fn get_by_client(&self, client_id: Uuid) -> Result<Vec<Queue>> {
        let query = Query::select()
            .columns([
                Queues::QueueId,
                Queues::ClientId,
                Queues::CreatedAt,
                Queues::EndedAt,
            ])
            .from(Queues::Table)
            .and_where(Expr::col(Queues::ClientId).eq(client_id.to_string()))
            .to_string(SqliteQueryBuilder);

        self.fetch_where(query).await
    }

    async fn get_by_created_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Queue>> {
        let query = Query::select()
            .columns([
                Queues::QueueId,
                Queues::ClientId,
                Queues::CreatedAt,
                Queues::EndedAt,
            ])
            .from(Queues::Table)
            .and_where(Expr::col(Queues::CreatedAt).gte(start.to_rfc3339()))
            .and_where(Expr::col(Queues::CreatedAt).lte(end.to_rfc3339()))
            .to_string(SqliteQueryBuilder);

        self.fetch_where(query).await
    }
}
