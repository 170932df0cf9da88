use chrono::Utc;

use application_intake::storage::models::{ApplicationRecord, ApplicationStatus};
use application_intake::storage::Database;

fn test_db() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(dir.path().join("data")).unwrap();
    (dir, db)
}

fn sample_application(id: &str) -> ApplicationRecord {
    ApplicationRecord {
        application_id: id.to_string(),
        name: "Jane Doe".to_string(),
        email: "jane@x.com".to_string(),
        position: "Engineer".to_string(),
        resume_url: format!("http://localhost:8080/resumes/{id}.pdf?expires=1&signature=sig"),
        status: ApplicationStatus::Submitted,
        created_at: Utc::now(),
    }
}

#[test]
fn test_put_and_get_application() {
    let (_dir, db) = test_db();
    let record = sample_application("app-1");

    db.put_application(&record).unwrap();

    let retrieved = db
        .get_application("app-1")
        .unwrap()
        .expect("application should exist");
    assert_eq!(retrieved.application_id, "app-1");
    assert_eq!(retrieved.name, "Jane Doe");
    assert_eq!(retrieved.email, "jane@x.com");
    assert_eq!(retrieved.position, "Engineer");
    assert_eq!(retrieved.resume_url, record.resume_url);
    assert_eq!(retrieved.status, ApplicationStatus::Submitted);
    assert_eq!(retrieved.created_at, record.created_at);
}

#[test]
fn test_get_application_not_found() {
    let (_dir, db) = test_db();
    assert!(db.get_application("nonexistent").unwrap().is_none());
}

#[test]
fn test_put_application_overwrites_same_id() {
    let (_dir, db) = test_db();
    let mut record = sample_application("app-2");
    db.put_application(&record).unwrap();

    record.position = "Senior Engineer".to_string();
    db.put_application(&record).unwrap();

    let retrieved = db.get_application("app-2").unwrap().unwrap();
    assert_eq!(retrieved.position, "Senior Engineer");
}

#[test]
fn test_distinct_ids_are_distinct_records() {
    let (_dir, db) = test_db();
    db.put_application(&sample_application("app-3")).unwrap();
    db.put_application(&sample_application("app-4")).unwrap();

    assert!(db.get_application("app-3").unwrap().is_some());
    assert!(db.get_application("app-4").unwrap().is_some());
}

#[test]
fn test_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");

    {
        let db = Database::open(&data_dir).unwrap();
        db.put_application(&sample_application("app-5")).unwrap();
    }

    let db = Database::open(&data_dir).unwrap();
    assert!(db.get_application("app-5").unwrap().is_some());
}
