//! SQLite storage integration tests.
//!
//! Run with: cargo test --test storage_sqlite --features sqlite
//!
//! Uses in-memory databases, no external dependencies required.

#![cfg(feature = "sqlite")]

use chrono::{Duration, Utc};
use uuid::Uuid;

use kiosk_core::models::{
    Admin, Client, CriteriaScores, Employee, NewQueue, NewRating, Office, Score,
};
use kiosk_core::storage::{
    AdminStore, ClientStore, EmployeeStore, OfficeStore, QueueStore, RatingStore,
    SqliteAdminStore, SqliteClientStore, SqliteEmployeeStore, SqliteOfficeStore, SqliteQueueStore,
    SqliteRatingStore, StoreError,
};

/// One connection only: each `sqlite::memory:` connection is its own
/// database.
async fn connect() -> sqlx::SqlitePool {
    sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to connect to SQLite")
}

fn score(value: u8) -> Option<Score> {
    Some(Score::new(value).unwrap())
}

#[tokio::test]
async fn test_queue_store_lifecycle() {
    let store = SqliteQueueStore::new(connect().await);
    store.init().await.unwrap();

    let client_id = Uuid::new_v4();
    let first = store.insert(NewQueue { client_id }).await.unwrap();
    let second = store.insert(NewQueue { client_id }).await.unwrap();

    // Store-assigned ascending sequence, open on creation.
    assert!(second.queue_id > first.queue_id);
    assert!(first.is_active());

    let mut closed = first.clone();
    closed.ended_at = Some(Utc::now());
    let updated = store.update(&closed).await.unwrap();
    assert!(updated.ended_at.unwrap() >= updated.created_at);

    let active = store.get_active().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].queue_id, second.queue_id);

    let history = store.get_by_client(client_id).await.unwrap();
    assert_eq!(history.len(), 2);

    assert!(store.get_by_id(9999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_queue_store_created_range() {
    let store = SqliteQueueStore::new(connect().await);
    store.init().await.unwrap();

    let queue = store
        .insert(NewQueue {
            client_id: Uuid::new_v4(),
        })
        .await
        .unwrap();

    let now = Utc::now();
    let hour = Duration::hours(1);

    let hit = store.get_by_created_range(now - hour, now + hour).await.unwrap();
    assert_eq!(hit.len(), 1);
    assert_eq!(hit[0].queue_id, queue.queue_id);

    let miss = store
        .get_by_created_range(now + hour, now + hour * 2)
        .await
        .unwrap();
    assert!(miss.is_empty());
}

#[tokio::test]
async fn test_queue_store_update_unknown_row() {
    let store = SqliteQueueStore::new(connect().await);
    store.init().await.unwrap();

    let ghost = kiosk_core::models::Queue {
        queue_id: 42,
        client_id: Uuid::new_v4(),
        created_at: Utc::now(),
        ended_at: None,
    };

    let err = store.update(&ghost).await.unwrap_err();
    assert!(matches!(err, StoreError::RowNotFound { table: "queues", .. }));
}

#[tokio::test]
async fn test_rating_store_round_trip() {
    let store = SqliteRatingStore::new(connect().await);
    store.init().await.unwrap();

    let emp_id = Uuid::new_v4();
    let created = store
        .insert(NewRating {
            queue_id: 7,
            emp_id,
            criteria: CriteriaScores {
                first: score(1),
                second: score(2),
                third: score(4),
                fourth: score(5),
            },
            comments: Some("very helpful".to_string()),
        })
        .await
        .unwrap();

    // Generated id and timestamp, identical values back from the store.
    let by_queue = store.get_by_queue(7).await.unwrap();
    assert_eq!(by_queue, vec![created.clone()]);

    let by_employee = store.get_by_employee(emp_id).await.unwrap();
    assert_eq!(by_employee, vec![created.clone()]);

    let by_id = store.get_by_id(created.rating_id).await.unwrap();
    assert_eq!(by_id, Some(created));
}

#[tokio::test]
async fn test_rating_store_nullable_criteria_and_comments() {
    let store = SqliteRatingStore::new(connect().await);
    store.init().await.unwrap();

    let emp_id = Uuid::new_v4();
    store
        .insert(NewRating {
            queue_id: 1,
            emp_id,
            criteria: CriteriaScores {
                second: score(3),
                ..Default::default()
            },
            comments: None,
        })
        .await
        .unwrap();
    store
        .insert(NewRating {
            queue_id: 1,
            emp_id,
            criteria: CriteriaScores::default(),
            comments: Some("".to_string()),
        })
        .await
        .unwrap();
    store
        .insert(NewRating {
            queue_id: 2,
            emp_id,
            criteria: CriteriaScores::default(),
            comments: Some("long wait".to_string()),
        })
        .await
        .unwrap();

    let ratings = store.get_by_employee(emp_id).await.unwrap();
    assert_eq!(ratings.len(), 3);
    assert_eq!(ratings[0].criteria.second, score(3));
    assert!(ratings[0].criteria.first.is_none());

    // Null and empty comments are both dropped, store order kept.
    let comments = store.get_comments_by_employee(emp_id).await.unwrap();
    assert_eq!(comments, vec!["long wait"]);
}

#[tokio::test]
async fn test_admin_store_crud_and_email_lookup() {
    let store = SqliteAdminStore::new(connect().await);
    store.init().await.unwrap();

    let admin = store
        .insert(Admin {
            admin_id: Uuid::new_v4(),
            email_address: "desk@city.example".to_string(),
            first_name: Some("Sam".to_string()),
            last_name: None,
            created_at: None,
        })
        .await
        .unwrap();
    assert!(admin.created_at.is_some());

    let found = store.get_by_email("desk@city.example").await.unwrap();
    assert_eq!(found, Some(admin.clone()));
    assert!(store.get_by_email("ghost@city.example").await.unwrap().is_none());

    let mut renamed = admin.clone();
    renamed.last_name = Some("Okafor".to_string());
    let updated = store.update(&renamed).await.unwrap();
    assert_eq!(updated.last_name.as_deref(), Some("Okafor"));

    assert!(store.delete(admin.admin_id).await.unwrap());
    assert!(!store.delete(admin.admin_id).await.unwrap());
    assert!(store.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_client_store_crud() {
    let store = SqliteClientStore::new(connect().await);
    store.init().await.unwrap();

    let client = store
        .insert(Client {
            client_id: Uuid::new_v4(),
            first_name: "Ana".to_string(),
            last_name: "Costa".to_string(),
            created_at: None,
        })
        .await
        .unwrap();

    assert_eq!(store.get_by_id(client.client_id).await.unwrap(), Some(client.clone()));
    assert_eq!(store.get_all().await.unwrap().len(), 1);
    assert!(store.delete(client.client_id).await.unwrap());
}

#[tokio::test]
async fn test_employee_store_office_filter() {
    let pool = connect().await;
    let employees = SqliteEmployeeStore::new(pool.clone());
    employees.init().await.unwrap();
    let offices = SqliteOfficeStore::new(pool);
    offices.init().await.unwrap();

    let office = offices
        .insert(Office {
            office_id: Uuid::new_v4(),
            name: "Permits".to_string(),
        })
        .await
        .unwrap();

    for (name, office_name) in [("Ana", Some("Permits")), ("Ben", Some("Permits")), ("Cy", None)] {
        employees
            .insert(Employee {
                emp_id: Uuid::new_v4(),
                first_name: name.to_string(),
                last_name: "Reyes".to_string(),
                office: office_name.map(str::to_string),
                position: Some("clerk".to_string()),
                created_at: None,
            })
            .await
            .unwrap();
    }

    let staffed = employees.get_by_office_name(&office.name).await.unwrap();
    assert_eq!(staffed.len(), 2);
    assert!(employees.get_by_office_name("Archives").await.unwrap().is_empty());
}
