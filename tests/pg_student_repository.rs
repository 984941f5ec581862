//! `PgStudentRepository` against a real PostgreSQL server.
//!
//! Reads `DATABASE_URL` (a `.env` file is honoured). Each test migrates its own
//! throwaway schema and drops it afterwards. Without `DATABASE_URL` the tests
//! print a skip marker and return.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use student_records::{
    apply_migrations, ensure_database_exists, ChangeSet, NewStudent, PgStudentRepository, StoreError, Student,
    StudentRepository,
};

static SCHEMA_SEQ: AtomicU32 = AtomicU32::new(0);

struct TestDb {
    pool: PgPool,
    schema: String,
    repo: PgStudentRepository,
}

impl TestDb {
    async fn drop_schema(self) {
        sqlx::query(&format!("DROP SCHEMA IF EXISTS \"{}\" CASCADE", self.schema))
            .execute(&self.pool)
            .await
            .expect("drop test schema");
    }
}

async fn test_db() -> Option<TestDb> {
    dotenvy::dotenv().ok();
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("SKIP-PG: set DATABASE_URL to run PostgreSQL repository tests");
        return None;
    };
    ensure_database_exists(&url).await.expect("create database");
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(&url)
        .await
        .expect("connect to DATABASE_URL");

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let schema = format!(
        "students_it_{}_{}_{}",
        std::process::id(),
        SCHEMA_SEQ.fetch_add(1, Ordering::SeqCst),
        nanos
    );
    apply_migrations(&pool, &schema).await.expect("migrate test schema");
    let repo = PgStudentRepository::new(pool.clone(), &schema);
    Some(TestDb { pool, schema, repo })
}

fn new_student(name: &str, ra: &str, cpf: &str) -> NewStudent {
    NewStudent {
        name: name.to_string(),
        email: format!("{}@gmail.com", ra.trim()),
        ra: ra.to_string(),
        cpf: cpf.to_string(),
    }
}

async fn commit_add(repo: &PgStudentRepository, student: NewStudent) -> Result<bool, StoreError> {
    let mut changes = ChangeSet::new();
    changes.add(student);
    repo.commit(changes).await
}

async fn insert(repo: &PgStudentRepository, student: NewStudent) -> Student {
    let ra = student.ra.clone();
    assert!(commit_add(repo, student).await.expect("insert"));
    repo.get_by_ra(&ra).await.expect("lookup").expect("inserted row")
}

#[tokio::test]
async fn inserted_row_reads_back_verbatim() {
    let Some(db) = test_db().await else { return };

    let stored = insert(&db.repo, new_student(" João ", " 001 ", "11111111111")).await;
    let by_id = db.repo.get_by_id(stored.id).await.unwrap().expect("by id");
    assert_eq!(by_id, stored);
    assert_eq!(
        (by_id.name.as_str(), by_id.ra.as_str(), by_id.cpf.as_str()),
        (" João ", " 001 ", "11111111111")
    );
    assert!(db.repo.get_by_ra("001").await.unwrap().is_none());
    assert!(db.repo.get_by_id(stored.id + 1000).await.unwrap().is_none());

    db.drop_schema().await;
}

#[tokio::test]
async fn unique_violation_maps_to_duplicate_ra() {
    let Some(db) = test_db().await else { return };
    insert(&db.repo, new_student("João", "001", "11111111111")).await;

    let err = commit_add(&db.repo, new_student("Maria", "001", "22222222222"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateRa), "got {err:?}");
    assert_eq!(db.repo.get_all().await.unwrap().len(), 1);

    db.drop_schema().await;
}

#[tokio::test]
async fn concurrent_inserts_with_same_ra_commit_once() {
    let Some(db) = test_db().await else { return };

    let (a, b) = tokio::join!(
        commit_add(&db.repo, new_student("Ana", "777", "33333333333")),
        commit_add(&db.repo, new_student("Bia", "777", "44444444444")),
    );

    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| matches!(r, Ok(true))).count(), 1);
    assert_eq!(
        outcomes.iter().filter(|r| matches!(r, Err(StoreError::DuplicateRa))).count(),
        1
    );
    assert_eq!(db.repo.get_all().await.unwrap().len(), 1);

    db.drop_schema().await;
}

#[tokio::test]
async fn failed_commit_rolls_back_every_change() {
    let Some(db) = test_db().await else { return };
    let joao = insert(&db.repo, new_student("João", "001", "11111111111")).await;

    let mut renamed = joao.clone();
    renamed.name = "João Silva".into();
    let mut changes = ChangeSet::new();
    changes
        .add(new_student("Carla", "010", "55555555555"))
        .update(renamed)
        .add(new_student("Maria", "001", "22222222222"));
    let err = db.repo.commit(changes).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateRa), "got {err:?}");

    assert!(db.repo.get_by_ra("010").await.unwrap().is_none());
    assert_eq!(db.repo.get_by_id(joao.id).await.unwrap(), Some(joao));

    db.drop_schema().await;
}

#[tokio::test]
async fn missing_rows_commit_false() {
    let Some(db) = test_db().await else { return };
    let ghost = new_student("Fantasma", "404", "00000000000").with_id(999_999);

    assert!(!db.repo.commit(ChangeSet::new()).await.unwrap());

    let mut changes = ChangeSet::new();
    changes.update(ghost.clone());
    assert!(!db.repo.commit(changes).await.unwrap());

    let mut changes = ChangeSet::new();
    changes.delete(ghost);
    assert!(!db.repo.commit(changes).await.unwrap());

    db.drop_schema().await;
}

#[tokio::test]
async fn update_and_delete_affect_the_stored_row() {
    let Some(db) = test_db().await else { return };
    let mut joao = insert(&db.repo, new_student("João", "001", "11111111111")).await;

    joao.name = "João Souza".into();
    let mut changes = ChangeSet::new();
    changes.update(joao.clone());
    assert!(db.repo.commit(changes).await.unwrap());
    assert_eq!(db.repo.get_by_id(joao.id).await.unwrap(), Some(joao.clone()));

    let mut changes = ChangeSet::new();
    changes.delete(joao.clone());
    assert!(db.repo.commit(changes).await.unwrap());
    assert!(db.repo.get_by_id(joao.id).await.unwrap().is_none());

    db.drop_schema().await;
}

#[tokio::test]
async fn paged_total_counts_all_matches_before_slicing() {
    let Some(db) = test_db().await else { return };
    insert(&db.repo, new_student("Ana", "001", "11111111111")).await;
    insert(&db.repo, new_student("Bruno", "002", "22222222222")).await;
    insert(&db.repo, new_student("Carla", "003", "33333333333")).await;

    let page = db.repo.get_paged(2, 2, "").await.unwrap();
    assert_eq!(page.total_items, 3);
    assert_eq!((page.page, page.page_size), (2, 2));
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Carla");

    let beyond = db.repo.get_paged(5, 2, "").await.unwrap();
    assert_eq!(beyond.total_items, 3);
    assert!(beyond.items.is_empty());

    db.drop_schema().await;
}

#[tokio::test]
async fn search_matches_name_ra_and_cpf_literally() {
    let Some(db) = test_db().await else { return };
    insert(&db.repo, new_student("100% Silva", "001", "11111111111")).await;
    insert(&db.repo, new_student("Bruno", "A_7", "22222222222")).await;
    insert(&db.repo, new_student("Carla", "003", "12345678901")).await;

    let by_cpf = db.repo.get_paged(1, 10, "4567").await.unwrap();
    assert_eq!(by_cpf.total_items, 1);
    assert_eq!(by_cpf.items[0].name, "Carla");

    let by_ra = db.repo.get_paged(1, 10, "A_").await.unwrap();
    assert_eq!(by_ra.total_items, 1);
    assert_eq!(by_ra.items[0].name, "Bruno");

    let percent = db.repo.get_paged(1, 10, "%").await.unwrap();
    assert_eq!(percent.total_items, 1);
    assert_eq!(percent.items[0].name, "100% Silva");

    let underscore = db.repo.get_paged(1, 10, "_").await.unwrap();
    assert_eq!(underscore.total_items, 1);

    let backslash = db.repo.get_paged(1, 10, "\\").await.unwrap();
    assert_eq!(backslash.total_items, 0);

    let case_sensitive = db.repo.get_paged(1, 10, "silva").await.unwrap();
    assert_eq!(case_sensitive.total_items, 0);

    db.drop_schema().await;
}
