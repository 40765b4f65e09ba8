//! Integration tests for plan-progress persistence: the get/put contract
//! the core's `ProgressTracker` is built on.

use std::sync::Arc;

use uuid::Uuid;

use d2r_core::progress::{PlanProgress, ProgressStore, ProgressTracker};
use d2r_db::models::NewOffice;
use d2r_db::queries::{offices, progress};
use d2r_db::store::PgProgressStore;
use d2r_test_utils::TestDb;

async fn seed_office(pool: &sqlx::PgPool) -> Uuid {
    let new = NewOffice {
        title: "School Board - District 2".to_owned(),
        state: "MN".to_owned(),
        district: "2".to_owned(),
        office_type: Some("schoolBoard".to_owned()),
        level: Some("local".to_owned()),
        ..NewOffice::default()
    };
    offices::upsert_office(pool, &new).await.unwrap().id
}

#[tokio::test]
async fn absent_record_reads_as_none() {
    let db = TestDb::new().await;
    let pool = &db.pool;
    let office_id = seed_office(pool).await;

    let got = progress::get_progress(pool, Uuid::new_v4(), office_id)
        .await
        .unwrap();
    assert!(got.is_none());

    db.teardown().await;
}

#[tokio::test]
async fn put_then_get_roundtrips_the_mapping() {
    let db = TestDb::new().await;
    let pool = &db.pool;
    let office_id = seed_office(pool).await;
    let user_id = Uuid::new_v4();

    let state = PlanProgress::default()
        .toggle("research")
        .toggle("bank")
        .toggle("bank"); // stored as explicit false

    progress::put_progress(pool, user_id, office_id, &state)
        .await
        .unwrap();

    let loaded = progress::get_progress(pool, user_id, office_id)
        .await
        .unwrap()
        .expect("record exists");
    assert_eq!(loaded, state);
    assert!(loaded.is_done("research"));
    assert!(!loaded.is_done("bank"));

    db.teardown().await;
}

#[tokio::test]
async fn upsert_is_last_write_wins() {
    let db = TestDb::new().await;
    let pool = &db.pool;
    let office_id = seed_office(pool).await;
    let user_id = Uuid::new_v4();

    let first = PlanProgress::default().toggle("research");
    progress::put_progress(pool, user_id, office_id, &first)
        .await
        .unwrap();

    let second = first.toggle("research").toggle("org");
    progress::put_progress(pool, user_id, office_id, &second)
        .await
        .unwrap();

    let loaded = progress::get_progress(pool, user_id, office_id)
        .await
        .unwrap()
        .expect("record exists");
    assert_eq!(loaded, second);
    assert!(!loaded.is_done("research"));

    db.teardown().await;
}

#[tokio::test]
async fn progress_is_private_to_the_user_office_pair() {
    let db = TestDb::new().await;
    let pool = &db.pool;
    let office_id = seed_office(pool).await;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let state = PlanProgress::default().toggle("doors");
    progress::put_progress(pool, alice, office_id, &state)
        .await
        .unwrap();

    assert!(progress::get_progress(pool, bob, office_id)
        .await
        .unwrap()
        .is_none());

    db.teardown().await;
}

#[tokio::test]
async fn tracker_over_pg_store_honors_the_load_contract() {
    let db = TestDb::new().await;
    let pool = &db.pool;
    let office_id = seed_office(pool).await;
    let user = Uuid::new_v4();

    let store: Arc<dyn ProgressStore> = Arc::new(PgProgressStore::new(pool.clone()));
    let tracker = ProgressTracker::new(store);

    // No authenticated user: absent, and no row is ever written.
    assert!(tracker.load(None, office_id).await.unwrap().is_none());

    // Authenticated but nothing saved yet: still absent.
    assert!(tracker.load(Some(user), office_id).await.unwrap().is_none());

    let state = PlanProgress::default().toggle("lit");
    tracker.save(Some(user), office_id, &state).await;

    let loaded = tracker.load(Some(user), office_id).await.unwrap();
    assert_eq!(loaded, Some(state));

    db.teardown().await;
}
