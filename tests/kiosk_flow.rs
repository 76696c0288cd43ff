//! End-to-end flow: registration, rating, dashboards, admin login.
//!
//! Runs on the in-memory backend through the same wiring the hosting
//! layer uses.

use uuid::Uuid;

use kiosk_core::config::Config;
use kiosk_core::models::{Admin, CriteriaScores, Employee, NewRating, Score};
use kiosk_core::services::{QueueError, Services};
use kiosk_core::storage::init_storage;

async fn services() -> Services {
    let config = Config::for_test();
    let stores = init_storage(&config.storage).await.expect("storage init");
    Services::new(&stores, &config)
}

async fn add_employee(services: &Services, first_name: &str, office: &str) -> Employee {
    services
        .employees
        .create(Employee {
            emp_id: Uuid::new_v4(),
            first_name: first_name.to_string(),
            last_name: "Ngata".to_string(),
            office: Some(office.to_string()),
            position: Some("clerk".to_string()),
            created_at: None,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_visit_flow_from_registration_to_dashboard() {
    let services = services().await;
    let employee = add_employee(&services, "Maya", "Registry").await;

    // Client walks up and registers; they get a queue number.
    let registration = services.clients.register("Ana", "Costa").await.unwrap();
    let queue_number = registration.queue.queue_id;
    assert!(queue_number > 0);

    // They rate the employee who served them.
    services
        .ratings
        .create(NewRating {
            queue_id: queue_number,
            emp_id: employee.emp_id,
            criteria: CriteriaScores {
                first: Score::new(5).ok(),
                second: Score::new(4).ok(),
                third: None,
                fourth: Score::new(3).ok(),
            },
            comments: Some("sorted everything out".to_string()),
        })
        .await
        .unwrap();

    // Then they end their queue on the way out.
    let ended = services.queues.end(queue_number).await.unwrap();
    assert!(ended.ended_at.is_some());
    assert!(services.queues.get_active().await.unwrap().is_empty());

    // Ending it again is rejected.
    assert!(matches!(
        services.queues.end(queue_number).await,
        Err(QueueError::AlreadyEnded { .. })
    ));

    // The rating shows up against the visit and in the aggregates.
    let visit_ratings = services.ratings.get_by_queue(queue_number).await.unwrap();
    assert_eq!(visit_ratings.len(), 1);
    assert_eq!(visit_ratings[0].emp_id, employee.emp_id);

    let average = services
        .ratings
        .average_for_employee(employee.emp_id)
        .await
        .unwrap();
    assert_eq!(average.first, 5.0);
    assert_eq!(average.third, 0.0);
    assert_eq!(average.overall, 3.0);

    let comments = services
        .ratings
        .comments_for_employee(employee.emp_id)
        .await
        .unwrap();
    assert_eq!(comments, vec!["sorted everything out"]);
}

#[tokio::test]
async fn test_dashboard_aggregates_across_employees() {
    let services = services().await;

    let star = add_employee(&services, "Maya", "Registry").await;
    let steady = add_employee(&services, "Noor", "Registry").await;
    let quiet = add_employee(&services, "Owen", "Registry").await;

    for (employee, value) in [(&star, 5), (&steady, 3)] {
        services
            .ratings
            .create(NewRating {
                queue_id: 1,
                emp_id: employee.emp_id,
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

    let pool = vec![star.emp_id, steady.emp_id, quiet.emp_id];
    let top = services.ratings.top_employees(&pool).await.unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].emp_id, star.emp_id);
    assert_eq!(top[1].emp_id, steady.emp_id);

    // The ranking board still lists the unrated employee, last.
    let board = services.employees.rank_all().await.unwrap();
    assert_eq!(board.len(), 3);
    assert_eq!(board[2].emp_id, quiet.emp_id);
    assert_eq!(board[2].rank, 3);
}

#[tokio::test]
async fn test_admin_login_against_configured_code() {
    let services = services().await;

    services
        .admins
        .create(Admin {
            admin_id: Uuid::new_v4(),
            email_address: "lead@city.example".to_string(),
            first_name: None,
            last_name: None,
            created_at: None,
        })
        .await
        .unwrap();

    // Config::for_test configures "test-code" as the shared secret.
    let context = services
        .admins
        .login("lead@city.example", "test-code")
        .await
        .unwrap();
    assert!(context.is_authenticated());

    let refused = services
        .admins
        .login("lead@city.example", "wrong")
        .await
        .unwrap();
    assert!(!refused.is_authenticated());
}
