//! SQLite ClientStore implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_query::{Expr, Query, SqliteQueryBuilder};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{parse_opt_ts, parse_uuid};
use crate::models::Client;
use crate::storage::schema::{Clients, CREATE_CLIENTS_TABLE};
use crate::storage::{ClientStore, Result, StoreError};

const ALL_COLUMNS: [Clients; 4] = [
    Clients::ClientId,
    Clients::FirstName,
    Clients::LastName,
    Clients::CreatedAt,
];

/// SQLite implementation of ClientStore.
pub struct SqliteClientStore {
    pool: SqlitePool,
}

impl SqliteClientStore {
    /// Create a new SQLite client store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the database schema.
    pub async fn init(&self) -> Result<()> {
        sqlx::raw_sql(CREATE_CLIENTS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    fn from_row(row: &SqliteRow) -> Result<Client> {
        let client_id: String = row.get("client_id");
        Ok(Client {
            client_id: parse_uuid(&client_id)?,
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            created_at: parse_opt_ts(row.get("created_at"))?,
        })
    }
}

#[async_trait]
impl ClientStore for SqliteClientStore {
    async fn get_all(&self) -> Result<Vec<Client>> {
        let query = Query::select()
            .columns(ALL_COLUMNS)
            .from(Clients::Table)
            .to_string(SqliteQueryBuilder);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        rows.iter().map(Self::from_row).collect()
    }

    async fn get_by_id(&self, client_id: Uuid) -> Result<Option<Client>> {
        let query = Query::select()
            .columns(ALL_COLUMNS)
            .from(Clients::Table)
            .and_where(Expr::col(Clients::ClientId).eq(client_id.to_string()))
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query).fetch_optional(&self.pool).await?;
        row.as_ref().map(Self::from_row).transpose()
    }

    async fn insert(&self, client: Client) -> Result<Client> {
        let created_at = client.created_at.unwrap_or_else(Utc::now);

        let query = Query::insert()
            .into_table(Clients::Table)
            .columns(ALL_COLUMNS)
            .values_panic([
                client.client_id.to_string().into(),
                client.first_name.clone().into(),
                client.last_name.clone().into(),
                created_at.to_rfc3339().into(),
            ])
            .to_string(SqliteQueryBuilder);

        sqlx::query(&query).execute(&self.pool).await?;

        self.get_by_id(client.client_id)
            .await?
            .ok_or_else(|| StoreError::row_not_found("clients", client.client_id))
    }

    async fn update(&self, client: &Client) -> Result<Client> {
        let query = Query::update()
            .table(Clients::Table)
            .values([
                (Clients::FirstName, client.first_name.clone().into()),
                (Clients::LastName, client.last_name.clone().into()),
                (
                    Clients::CreatedAt,
                    client.created_at.map(|t| t.to_rfc3339()).into(),
                ),
            ])
            .and_where(Expr::col(Clients::ClientId).eq(client.client_id.to_string()))
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::row_not_found("clients", client.client_id));
        }

        self.get_by_id(client.client_id)
            .await?
            .ok_or_else(|| StoreError::row_not_found("clients", client.client_id))
    }

    async fn delete(&self, client_id: Uuid) -> Result<bool> {
        let query = Query::delete()
            .from_table(Clients::Table)
            .and_where(Expr::col(Clients::ClientId).eq(client_id.to_string()))
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
