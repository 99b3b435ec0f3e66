use chrono::{Duration, Utc};

use dovecote_backend::repositories::sessions;

mod support;

#[tokio::test]
async fn session_roundtrip_and_shape() {
    let _guard = support::integration_guard().await;
    let Some(pool) = support::try_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    support::reset(&pool).await;

    let user_id = support::seed_user(&pool, "alice", "a@x.com").await;
    let key = sessions::create_session(&pool, user_id, 120)
        .await
        .expect("create session");
    assert_eq!(key.len(), 32);

    let resolved = sessions::validate_session(&pool, &key)
        .await
        .expect("validate");
    assert_eq!(resolved, Some(user_id));

    assert_eq!(
        sessions::validate_session(&pool, "not-a-real-key")
            .await
            .expect("validate unknown"),
        None
    );
}

#[tokio::test]
async fn second_login_invalidates_the_first_session() {
    let _guard = support::integration_guard().await;
    let Some(pool) = support::try_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    support::reset(&pool).await;

    let user_id = support::seed_user(&pool, "bob", "b@x.com").await;
    let first = sessions::create_session(&pool, user_id, 120)
        .await
        .expect("first session");
    let second = sessions::create_session(&pool, user_id, 120)
        .await
        .expect("second session");
    assert_ne!(first, second);

    assert_eq!(
        sessions::validate_session(&pool, &first).await.expect("old key"),
        None
    );
    assert_eq!(
        sessions::validate_session(&pool, &second)
            .await
            .expect("new key"),
        Some(user_id)
    );

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .expect("count");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn expired_session_is_treated_as_missing() {
    let _guard = support::integration_guard().await;
    let Some(pool) = support::try_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    support::reset(&pool).await;

    let user_id = support::seed_user(&pool, "carol", "c@x.com").await;
    let key = sessions::create_session(&pool, user_id, 120)
        .await
        .expect("create session");

    // Drag the expiry across the boundary.
    sqlx::query("UPDATE sessions SET valid_until = $1 WHERE user_id = $2")
        .bind(Utc::now() - Duration::seconds(1))
        .bind(user_id)
        .execute(&pool)
        .await
        .expect("expire session");
    assert_eq!(
        sessions::validate_session(&pool, &key).await.expect("expired"),
        None
    );

    // Activity renewal brings it back.
    assert!(sessions::bump_session(&pool, user_id, 120)
        .await
        .expect("bump"));
    assert_eq!(
        sessions::validate_session(&pool, &key).await.expect("bumped"),
        Some(user_id)
    );
}

#[tokio::test]
async fn destroy_and_cleanup_remove_rows() {
    let _guard = support::integration_guard().await;
    let Some(pool) = support::try_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    support::reset(&pool).await;

    let alice = support::seed_user(&pool, "alice", "a@x.com").await;
    let bob = support::seed_user(&pool, "bob", "b@x.com").await;

    let alice_key = sessions::create_session(&pool, alice, 120)
        .await
        .expect("alice session");
    sessions::create_session(&pool, bob, 120)
        .await
        .expect("bob session");

    sessions::delete_sessions_for_user(&pool, alice)
        .await
        .expect("logout alice");
    assert_eq!(
        sessions::validate_session(&pool, &alice_key)
            .await
            .expect("alice gone"),
        None
    );

    sqlx::query("UPDATE sessions SET valid_until = $1 WHERE user_id = $2")
        .bind(Utc::now() - Duration::seconds(1))
        .bind(bob)
        .execute(&pool)
        .await
        .expect("expire bob");
    let purged = sessions::cleanup_expired_sessions(&pool)
        .await
        .expect("cleanup");
    assert_eq!(purged, 1);
}
