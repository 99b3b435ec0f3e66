use dovecote_backend::repositories::users::{self, RegisterError, VerifyError};

mod support;

#[tokio::test]
async fn duplicate_email_is_rejected_and_leaves_one_row() {
    let _guard = support::integration_guard().await;
    let Some(pool) = support::try_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    support::reset(&pool).await;

    users::create_user(&pool, "alice", "a@x.com", "pw-one")
        .await
        .expect("first registration");

    let err = users::create_user(&pool, "alice2", "a@x.com", "pw-two")
        .await
        .expect_err("second registration with the same email");
    assert!(matches!(err, RegisterError::DuplicateEmail));

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind("a@x.com")
        .fetch_one(&pool)
        .await
        .expect("count");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn verify_credentials_distinguishes_failures_internally() {
    let _guard = support::integration_guard().await;
    let Some(pool) = support::try_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    support::reset(&pool).await;

    let user_id = users::create_user(&pool, "bob", "b@x.com", "correct-horse")
        .await
        .expect("register");

    let user = users::verify_credentials(&pool, "b@x.com", "correct-horse")
        .await
        .expect("good credentials");
    assert_eq!(user.id, user_id);
    assert_eq!(user.login, "bob");

    let err = users::verify_credentials(&pool, "b@x.com", "wrong")
        .await
        .expect_err("bad password");
    assert!(matches!(err, VerifyError::BadPassword));

    let err = users::verify_credentials(&pool, "nobody@x.com", "whatever")
        .await
        .expect_err("unknown email");
    assert!(matches!(err, VerifyError::NotFound));
}

#[tokio::test]
async fn stored_record_never_contains_the_plaintext() {
    let _guard = support::integration_guard().await;
    let Some(pool) = support::try_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    support::reset(&pool).await;

    users::create_user(&pool, "carol", "c@x.com", "super-secret-pw")
        .await
        .expect("register");

    let user = users::find_user_by_email(&pool, "c@x.com")
        .await
        .expect("lookup")
        .expect("exists");
    assert_ne!(user.password_hash, "super-secret-pw");
    assert!(!user.password_hash.contains("super-secret-pw"));
    assert!(!user.password_salt.is_empty());
}
