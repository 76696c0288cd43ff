//! SQLite AdminStore implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_query::{Expr, Query, SqliteQueryBuilder};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{parse_opt_ts, parse_uuid};
use crate::models::Admin;
use crate::storage::schema::{Admins, CREATE_ADMINS_TABLE};
use crate::storage::{AdminStore, Result, StoreError};

const ALL_COLUMNS: [Admins; 5] = [
    Admins::AdminId,
    Admins::EmailAddress,
    Admins::FirstName,
    Admins::LastName,
    Admins::CreatedAt,
];

/// SQLite implementation of AdminStore.
pub struct SqliteAdminStore {
    pool: SqlitePool,
}

impl SqliteAdminStore {
    /// Create a new SQLite admin store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the database schema.
    pub async fn init(&self) -> Result<()> {
        sqlx::raw_sql(CREATE_ADMINS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    fn from_row(row: &SqliteRow) -> Result<Admin> {
        let admin_id: String = row.get("admin_id");
        Ok(Admin {
            admin_id: parse_uuid(&admin_id)?,
            email_address: row.get("email_address"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            created_at: parse_opt_ts(row.get("created_at"))?,
        })
    }
}

#[async_trait]
impl AdminStore for SqliteAdminStore {
    async fn get_all(&self) -> Result<Vec<Admin>> {
        let query = Query::select()
            .columns(ALL_COLUMNS)
            .from(Admins::Table)
            .to_string(SqliteQueryBuilder);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        rows.iter().map(Self::from_row).collect()
    }

    async fn get_by_id(&self, admin_id: Uuid) -> Result<Option<Admin>> {
        let query = Query::select()
            .columns(ALL_COLUMNS)
            .from(Admins::Table)
            .and_where(Expr::col(Admins::AdminId).eq(admin_id.to_string()))
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query).fetch_optional(&self.pool).await?;
        row.as_ref().map(Self::from_row).transpose()
    }

    async fn insert(&self, admin: Admin) -> Result<Admin> {
        let created_at = admin.created_at.unwrap_or_else(Utc::now);

        let query = Query::insert()
            .into_table(Admins::Table)
            .columns(ALL_COLUMNS)
            .values_panic([
                admin.admin_id.to_string().into(),
                admin.email_address.clone().into(),
                admin.first_name.clone().into(),
                admin.last_name.clone().into(),
                created_at.to_rfc3339().into(),
            ])
            .to_string(SqliteQueryBuilder);

        sqlx::query(&query).execute(&self.pool).await?;

        self.get_by_id(admin.admin_id)
            .await?
            .ok_or_else(|| StoreError::row_not_found("admins", admin.admin_id))
    }

    async fn update(&self, admin: &Admin) -> Result<Admin> {
        let query = Query::update()
            .table(Admins::Table)
            .values([
                (Admins::EmailAddress, admin.email_address.clone().into()),
                (Admins::FirstName, admin.first_name.clone().into()),
                (Admins::LastName, admin.last_name.clone().into()),
                (
                    Admins::CreatedAt,
                    admin.created_at.map(|t| t.to_rfc3339()).into(),
                ),
            ])
            .and_where(Expr::col(Admins::AdminId).eq(admin.admin_id.to_string()))
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::row_not_found("admins", admin.admin_id));
        }

        self.get_by_id(admin.admin_id)
            .await?
            .ok_or_else(|| StoreError::row_not_found("admins", admin.admin_id))
    }

    async fn delete(&self, admin_id: Uuid) -> Result<bool> {
        let query = Query::delete()
            .from_table(Admins::Table)
            .and_where(Expr::col(Admins::AdminId).eq(admin_id.to_string()))
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Admin>> {
        let query = Query::select()
            .columns(ALL_COLUMNS)
            .from(Admins::Table)
            .and_where(Expr::col(Admins::EmailAddress).eq(email))
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query).fetch_optional(&self.pool).await?;
        row.as_ref().map(Self::from_row).transpose()
    }
}
