// tests/pg_store_tests.rs
//
// Runs against a real Postgres. Skipped when DATABASE_URL is not set.

use std::sync::Arc;

use family_dna_lab::{
    dna::{ChildDnaType, calculate_parent_dna_type},
    error::AppError,
    models::parent::{NewParent, StrategyMark},
    store::{FamilyStore, PgStore},
};
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Connects and migrates, or returns `None` when no database is configured.
async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping Postgres store test");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing. Make sure DATABASE_URL is set.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    Some(pool)
}

fn unique_email() -> String {
    format!("pg_{}@example.com", uuid::Uuid::new_v4())
}

fn new_parent(email: &str) -> NewParent {
    NewParent {
        email: email.to_string(),
        password_hash: "hash".to_string(),
        display_name: "Pat".to_string(),
        role: "parent".to_string(),
    }
}

/// Inserts an organization and school, then one student per (name, type, modifiers).
async fn seed_students(pool: &PgPool, students: &[(&str, Option<&str>, Option<&str>)]) -> Vec<i64> {
    let org_id: i64 = sqlx::query_scalar("INSERT INTO organizations (name) VALUES ($1) RETURNING id")
        .bind("Test District")
        .fetch_one(pool)
        .await
        .unwrap();

    let school_id: i64 = sqlx::query_scalar(
        "INSERT INTO schools (organization_id, name) VALUES ($1, $2) RETURNING id",
    )
    .bind(org_id)
    .bind("Test School")
    .fetch_one(pool)
    .await
    .unwrap();

    let mut ids = Vec::new();
    for (name, dna_type, modifiers) in students {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO students (school_id, first_name, grade, reading_dna_type, reading_dna_modifiers)
            VALUES ($1, $2, '4', $3, $4)
            RETURNING id
            "#,
        )
        .bind(school_id)
        .bind(*name)
        .bind(*dna_type)
        .bind(*modifiers)
        .fetch_one(pool)
        .await
        .unwrap();
        ids.push(id);
    }
    ids
}

#[tokio::test]
async fn find_students_keeps_requested_order() {
    let Some(pool) = test_pool().await else { return };
    let store = PgStore::new(pool.clone());

    let ids = seed_students(
        &pool,
        &[
            ("Ada", Some("curious_investigator"), Some("SF")),
            ("Bo", None, None),
            ("Cy", Some("retired_type"), None),
        ],
    )
    .await;

    let found = store
        .find_students(&[ids[2], -1, ids[0], ids[1]])
        .await
        .unwrap();
    let found_ids: Vec<i64> = found.iter().map(|s| s.id).collect();
    assert_eq!(found_ids, vec![ids[2], ids[0], ids[1]]);

    // Unknown stored type decodes to no type
    assert_eq!(found[0].reading_dna.as_ref().unwrap().dna_type, None);
    assert_eq!(found[1].dna_code(), "CI-SF");
    assert!(found[2].reading_dna.is_none());
}

#[tokio::test]
async fn link_matches_name_case_insensitively_and_keeps_link_order() {
    let Some(pool) = test_pool().await else { return };
    let store = PgStore::new(pool.clone());

    let ids = seed_students(&pool, &[("Ida", None, None), ("Jon", None, None)]).await;
    let parent = store.create_parent(new_parent(&unique_email())).await.unwrap();

    let err = store.link_student(parent.id, ids[0], "Ada").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    store.link_student(parent.id, ids[1], "jon").await.unwrap();
    store.link_student(parent.id, ids[0], "IDA").await.unwrap();
    // Re-linking is a no-op
    store.link_student(parent.id, ids[1], "Jon").await.unwrap();

    let profile = store.find_parent_profile(parent.id).await.unwrap().unwrap();
    assert_eq!(profile.linked_students, vec![ids[1], ids[0]]);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let Some(pool) = test_pool().await else { return };
    let store = PgStore::new(pool);

    let email = unique_email();
    store.create_parent(new_parent(&email)).await.unwrap();
    let err = store.create_parent(new_parent(&email)).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn parent_dna_round_trips_through_jsonb() {
    let Some(pool) = test_pool().await else { return };
    let store = PgStore::new(pool);

    let parent = store.create_parent(new_parent(&unique_email())).await.unwrap();
    let answers = [("bedtime", "read_it_together"), ("weekend", "family_read")]
        .iter()
        .map(|(q, o)| (q.to_string(), o.to_string()))
        .collect();
    let mut result = calculate_parent_dna_type(&answers);
    result.completed_at = Some(chrono::Utc::now());

    let saved = store.save_parent_dna(parent.id, &result).await.unwrap();
    assert_eq!(saved.parent_type, result.parent_type);
    assert_eq!(saved.trait_counts, result.trait_counts);

    let profile = store.find_parent_profile(parent.id).await.unwrap().unwrap();
    assert_eq!(profile.lux_dna.unwrap().parent_type, result.parent_type);

    let err = store.save_parent_dna(-1, &result).await.unwrap_err();
    assert!(matches!(err, AppError::ProfileNotFound(-1)));
}

#[tokio::test]
async fn unlock_returns_persisted_student() {
    let Some(pool) = test_pool().await else { return };
    let store = PgStore::new(pool.clone());

    let ids = seed_students(&pool, &[("Lu", Some("challenge_seeker"), None)]).await;
    let student = store.set_dna_unlocked(ids[0], true).await.unwrap();
    assert!(student.dna_unlocked);
    assert_eq!(
        student.reading_dna.unwrap().dna_type,
        Some(ChildDnaType::ChallengeSeeker)
    );

    let err = store.set_dna_unlocked(-1, true).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_toggles_are_all_persisted() {
    let Some(pool) = test_pool().await else { return };
    let store = Arc::new(PgStore::new(pool));
    let parent_id = store.create_parent(new_parent(&unique_email())).await.unwrap().id;

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .toggle_strategy(parent_id, StrategyMark::Starred, &format!("strategy {}", i))
                    .await
                    .unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap().active);
    }

    let profile = store.find_parent_profile(parent_id).await.unwrap().unwrap();
    assert_eq!(profile.strategy_progress.starred.len(), 16);

    let dismissed = store
        .toggle_strategy(parent_id, StrategyMark::Dismissed, "strategy 0")
        .await
        .unwrap();
    assert!(dismissed.active);
    assert!(!dismissed.progress.starred.contains("strategy 0"));
}
