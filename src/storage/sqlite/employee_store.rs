//! SQLite EmployeeStore implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_query::{Expr, Query, SqliteQueryBuilder};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{parse_opt_ts, parse_uuid};
use crate::models::Employee;
use crate::storage::schema::{Employees, CREATE_EMPLOYEES_TABLE};
use crate::storage::{EmployeeStore, Result, StoreError};

const ALL_COLUMNS: [Employees; 6] = [
    Employees::EmpId,
    Employees::FirstName,
    Employees::LastName,
    Employees::Office,
    Employees::Position,
    Employees::CreatedAt,
];

/// SQLite implementation of EmployeeStore.
pub struct SqliteEmployeeStore {
    pool: SqlitePool,
}

impl SqliteEmployeeStore {
    /// Create a new SQLite employee store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the database schema.
    pub async fn init(&self) -> Result<()> {
        sqlx::raw_sql(CREATE_EMPLOYEES_TABLE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn from_row(row: &SqliteRow) -> Result<Employee> {
        let emp_id: String = row.get("emp_id");
        Ok(Employee {
            emp_id: parse_uuid(&emp_id)?,
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            office: row.get("office"),
            position: row.get("position"),
            created_at: parse_opt_ts(row.get("created_at"))?,
        })
    }

    async fn fetch_where(&self, query: String) -> Result<Vec<Employee>> {
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        rows.iter().map(Self::from_row).collect()
    }
}

#[async_trait]
impl EmployeeStore for SqliteEmployeeStore {
    async fn get_all(&self) -> Result<Vec<Employee>> {
        let query = Query::select()
            .columns(ALL_COLUMNS)
            .from(Employees::Table)
            .to_string(SqliteQueryBuilder);

        self.fetch_where(query).await
    }

    async fn get_by_id(&self, emp_id: Uuid) -> Result<Option<Employee>> {
        let query = Query::select()
            .columns(ALL_COLUMNS)
            .from(Employees::Table)
            .and_where(Expr::col(Employees::EmpId).eq(emp_id.to_string()))
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query).fetch_optional(&self.pool).await?;
        row.as_ref().map(Self::from_row).transpose()
    }

    async fn insert(&self, employee: Employee) -> Result<Employee> {
        let created_at = employee.created_at.unwrap_or_else(Utc::now);

        let query = Query::insert()
            .into_table(Employees::Table)
            .columns(ALL_COLUMNS)
            .values_panic([
                employee.emp_id.to_string().into(),
                employee.first_name.clone().into(),
                employee.last_name.clone().into(),
                employee.office.clone().into(),
                employee.position.clone().into(),
                created_at.to_rfc3339().into(),
            ])
            .to_string(SqliteQueryBuilder);

        sqlx::query(&query).execute(&self.pool).await?;

        self.get_by_id(employee.emp_id)
            .await?
            .ok_or_else(|| StoreError::row_not_found("employees", employee.emp_id))
    }

    async fn update(&self, employee: &Employee) -> Result<Employee> {
        let query = Query::update()
            .table(Employees::Table)
            .values([
                (Employees::FirstName, employee.first_name.clone().into()),
                (Employees::LastName, employee.last_name.clone().into()),
                (Employees::Office, employee.office.clone().into()),
                (Employees::Position, employee.position.clone().into()),
                (
                    Employees::CreatedAt,
                    employee.created_at.map(|t| t.to_rfc3339()).into(),
                ),
            ])
            .and_where(Expr::col(Employees::EmpId).eq(employee.emp_id.to_string()))
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::row_not_found("employees", employee.emp_id));
        }

        self.get_by_id(employee.emp_id)
            .await?
            .ok_or_else(|| StoreError::row_not_found("employees", employee.emp_id))
    }

    async fn delete(&self, emp_id: Uuid) -> Result<bool> {
        let query = Query::delete()
            .from_table(Employees::Table)
            .and_where(Expr::col(Employees::EmpId).eq(emp_id.to_string()))
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_by_office_name(&self, office_name: &str) -> Result<Vec<Employee>> {
        let query = Query::select()
            .columns(ALL_COLUMNS)
            .from(Employees::Table)
            .and_where(Expr::col(Employees::Office).eq(office_name))
            .to_string(SqliteQueryBuilder);

        self.fetch_where(query).await
    }
}
