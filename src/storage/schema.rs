//! Database schema definitions using sea-query.
//!
//! These define the table and column identifiers for type-safe query
//! building.

use sea_query::Iden;

/// Admins table schema.
#[derive(Iden)]
pub enum Admins {
    Table,
    #[iden = "admin_id"]
    AdminId,
    #[iden = "email_address"]
    EmailAddress,
    #[iden = "first_name"]
    FirstName,
    #[iden = "last_name"]
    LastName,
    #[iden = "created_at"]
    CreatedAt,
}

/// Clients table schema.
#[derive(Iden)]
pub enum Clients {
    Table,
    #[iden = "client_id"]
    ClientId,
    #[iden = "first_name"]
    FirstName,
    #[iden = "last_name"]
    LastName,
    #[iden = "created_at"]
    CreatedAt,
}

/// Employees table schema.
#[derive(Iden)]
pub enum Employees {
    Table,
    #[iden = "emp_id"]
    EmpId,
    #[iden = "first_name"]
    FirstName,
    #[iden = "last_name"]
    LastName,
    #[iden = "office"]
    Office,
    #[iden = "position"]
    Position,
    #[iden = "created_at"]
    CreatedAt,
}

/// Offices table schema.
#[derive(Iden)]
pub enum Offices {
    Table,
    #[iden = "office_id"]
    OfficeId,
    #[iden = "name"]
    Name,
}

/// Queues table schema.
#[derive(Iden)]
pub enum Queues {
    Table,
    #[iden = "queue_id"]
    QueueId,
    #[iden = "client_id"]
    ClientId,
    #[iden = "created_at"]
    CreatedAt,
    #[iden = "ended_at"]
    EndedAt,
}

/// Ratings table schema.
#[derive(Iden)]
pub enum Ratings {
    Table,
    #[iden = "rating_id"]
    RatingId,
    #[iden = "queue_id"]
    QueueId,
    #[iden = "emp_id"]
    EmpId,
    #[iden = "first_criteria"]
    FirstCriteria,
    #[iden = "second_criteria"]
    SecondCriteria,
    #[iden = "third_criteria"]
    ThirdCriteria,
    #[iden = "fourth_criteria"]
    FourthCriteria,
    #[iden = "comments"]
    Comments,
    #[iden = "created_at"]
    CreatedAt,
}

/// SQL for creating the admins table.
pub const CREATE_ADMINS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS admins (
    admin_id TEXT PRIMARY KEY,
    email_address TEXT NOT NULL UNIQUE,
    first_name TEXT,
    last_name TEXT,
    created_at TEXT
);
"#;

/// SQL for creating the clients table.
pub const CREATE_CLIENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS clients (
    client_id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    created_at TEXT
);
"#;

/// SQL for creating the employees table.
pub const CREATE_EMPLOYEES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    emp_id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    office TEXT,
    position TEXT,
    created_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_employees_office ON employees(office);
"#;

/// SQL for creating the offices table.
pub const CREATE_OFFICES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS offices (
    office_id TEXT PRIMARY KEY,
    name TEXT NOT NULL
);
"#;

/// SQL for creating the queues table.
///
/// `queue_id` is the store-assigned sequence shown to clients as their
/// queue number.
pub const CREATE_QUEUES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS queues (
    queue_id INTEGER PRIMARY KEY AUTOINCREMENT,
    client_id TEXT NOT NULL,
    created_at TEXT NOT NULL,
    ended_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_queues_client ON queues(client_id);
CREATE INDEX IF NOT EXISTS idx_queues_ended ON queues(ended_at);
"#;

/// SQL for creating the ratings table.
pub const CREATE_RATINGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS ratings (
    rating_id TEXT PRIMARY KEY,
    queue_id INTEGER NOT NULL,
    emp_id TEXT NOT NULL,
    first_criteria INTEGER,
    second_criteria INTEGER,
    third_criteria INTEGER,
    fourth_criteria INTEGER,
    comments TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_ratings_emp ON ratings(emp_id);
CREATE INDEX IF NOT EXISTS idx_ratings_queue ON ratings(queue_id);
"#;
