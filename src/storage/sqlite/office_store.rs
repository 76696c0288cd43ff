//! SQLite OfficeStore implementation.

use async_trait::async_trait;
use sea_query::{Expr, Query, SqliteQueryBuilder};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::parse_uuid;
use crate::models::Office;
use crate::storage::schema::{Offices, CREATE_OFFICES_TABLE};
use crate::storage::{OfficeStore, Result, StoreError};

/// SQLite implementation of OfficeStore.
pub struct SqliteOfficeStore {
    pool: SqlitePool,
}

impl SqliteOfficeStore {
    /// Create a new SQLite office store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the database schema.
    pub async fn init(&self) -> Result<()> {
        sqlx::raw_sql(CREATE_OFFICES_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    fn from_row(row: &SqliteRow) -> Result<Office> {
        let office_id: String = row.get("office_id");
        Ok(Office {
            office_id: parse_uuid(&office_id)?,
            name: row.get("name"),
        })
    }
}

#[async_trait]
impl OfficeStore for SqliteOfficeStore {
    async fn get_all(&self) -> Result<Vec<Office>> {
        let query = Query::select()
            .columns([Offices::OfficeId, Offices::Name])
            .from(Offices::Table)
            .to_string(SqliteQueryBuilder);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        rows.iter().map(Self::from_row).collect()
    }

    async fn get_by_id(&self, office_id: Uuid) -> Result<Option<Office>> {
        let query = Query::select()
            .columns([Offices::OfficeId, Offices::Name])
            .from(Offices::Table)
            .and_where(Expr::col(Offices::OfficeId).eq(office_id.to_string()))
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query).fetch_optional(&self.pool).await?;
        row.as_ref().map(Self::from_row).transpose()
    }

    async fn insert(&self, office: Office) -> Result<Office> {
        let query = Query::insert()
            .into_table(Offices::Table)
            .columns([Offices::OfficeId, Offices::Name])
            .values_panic([
                office.office_id.to_string().into(),
                office.name.clone().into(),
            ])
            .to_string(SqliteQueryBuilder);

        sqlx::query(&query).execute(&self.pool).await?;

        self.get_by_id(office.office_id)
            .await?
            .ok_or_else(|| StoreError::row_not_found("offices", office.office_id))
    }

    async fn update(&self, office: &Office) -> Result<Office> {
        let query = Query::update()
            .table(Offices::Table)
            .values([(Offices::Name, office.name.clone().into())])
            .and_where(Expr::col(Offices::OfficeId).eq(office.office_id.to_string()))
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::row_not_found("offices", office.office_id));
        }

        self.get_by_id(office.office_id)
            .await?
            .ok_or_else(|| StoreError::row_not_found("offices", office.office_id))
    }

    async fn delete(&self, office_id: Uuid) -> Result<bool> {
        let query = Query::delete()
            .from_table(Offices::Table)
            .and_where(Expr::col(Offices::OfficeId).eq(office_id.to_string()))
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
