use std::sync::{atomic::Ordering, Arc};

use reqwest::StatusCode;

use super::*;
use crate::test_support::{user, FakeIdentityApi};

#[tokio::test]
async fn invalid_request_never_reaches_the_store() {
    let api = Arc::new(FakeIdentityApi::with_users(Vec::new()));
    let store = UserStore::new(api.clone());

    let outcome = handle_create(&store, CreateUserRequest::trimmed("A", "ann@x.com")).await;

    assert_eq!(
        outcome,
        ActionOutcome::Failed("Name must be at least 2 characters long".to_string())
    );
    assert!(api.users.lock().expect("users lock").is_empty());
    assert_eq!(store.snapshot().error, None);
}

#[tokio::test]
async fn create_outcome_reports_success_and_server_errors() {
    let api = Arc::new(FakeIdentityApi::with_users(Vec::new()));
    let store = UserStore::new(api.clone());

    let outcome = handle_create(&store, CreateUserRequest::trimmed("Ann", "ann@x.com")).await;
    assert!(outcome.is_success());
    assert_eq!(outcome.error(), None);
    assert_eq!(store.snapshot().users.len(), 1);

    *api.fail_with.lock().expect("fail lock") =
        Some((StatusCode::CONFLICT, "email already exists".to_string()));
    let outcome = handle_create(&store, CreateUserRequest::trimmed("Ann", "ann@x.com")).await;
    assert_eq!(outcome.error(), Some("email already exists"));
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let api = Arc::new(FakeIdentityApi::with_users(vec![user(5, "Eve")]));
    let store = UserStore::new(api.clone());
    store.fetch_users().await;

    let outcome = handle_delete(&store, UserId(5), DeleteConfirmation::Declined, None).await;

    assert_eq!(outcome, ActionOutcome::Cancelled);
    assert_eq!(outcome.error(), Some(DELETION_CANCELLED));
    assert_eq!(api.delete_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.snapshot().users.len(), 1);
}

#[tokio::test]
async fn confirmed_delete_removes_user() {
    let api = Arc::new(FakeIdentityApi::with_users(vec![user(1, "Ann"), user(5, "Eve")]));
    let store = UserStore::new(api.clone());
    store.fetch_users().await;

    let cancel = CancellationToken::new();
    let outcome = handle_delete(&store, UserId(5), true.into(), Some(&cancel)).await;

    assert!(outcome.is_success());
    assert_eq!(store.snapshot().users, vec![user(1, "Ann")]);
}

#[tokio::test]
async fn delete_with_cancelled_token_reports_cancellation() {
    let api = Arc::new(FakeIdentityApi::with_users(vec![user(5, "Eve")]));
    let store = UserStore::new(api);
    store.fetch_users().await;

    let cancel = CancellationToken::new();
    cancel.cancel();
    let outcome = handle_delete(&store, UserId(5), DeleteConfirmation::Confirmed, Some(&cancel)).await;

    assert_eq!(outcome, ActionOutcome::Cancelled);
    assert_eq!(store.snapshot().users.len(), 1);
    assert_eq!(store.snapshot().error, None);
}

#[test]
fn outcome_from_result_maps_variants() {
    assert_eq!(ActionOutcome::from(Ok::<(), ClientError>(())), ActionOutcome::Succeeded);
    assert_eq!(
        ActionOutcome::from(Err(ClientError::Cancelled)),
        ActionOutcome::Cancelled
    );
    assert_eq!(
        ActionOutcome::from(Err(ClientError::Unknown(None))),
        ActionOutcome::Failed("An unexpected error occurred".to_string())
    );
}
