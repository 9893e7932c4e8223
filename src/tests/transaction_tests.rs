use crate::constants::TRANSACTION_CREATED;
use crate::core::errors::LoyaltyError;
use crate::core::models::transaction::Transaction;
use crate::infrastructure::storage::{TransactionStore, UserStore};
use crate::tests::{create_counting_service, create_test_service, register_user};
use bigdecimal::BigDecimal;
use chrono::Utc;
use std::collections::HashSet;
use std::str::FromStr;

fn dec(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).unwrap()
}

#[tokio::test]
async fn test_unregistered_subject_is_rejected_everywhere() {
    let service = create_test_service();

    let created = service
        .create_transaction("nobody", "coffee".to_string(), "dining".to_string(), dec("4.50"))
        .await;
    assert_eq!(created.unwrap_err(), LoyaltyError::UserNotRegistered);
    assert_eq!(
        service.list_transactions("nobody").await.unwrap_err(),
        LoyaltyError::UserNotRegistered
    );
    assert_eq!(
        service.spending_by_category("nobody").await.unwrap_err(),
        LoyaltyError::UserNotRegistered
    );
}

#[tokio::test]
async fn test_missing_consent_is_rejected_everywhere() {
    let service = create_counting_service();
    register_user(service.users(), "carol", false).await;

    let created = service
        .create_transaction("carol", "coffee".to_string(), "dining".to_string(), dec("4.50"))
        .await;
    assert_eq!(created.unwrap_err(), LoyaltyError::ConsentNotGiven);
    assert_eq!(
        service.list_transactions("carol").await.unwrap_err(),
        LoyaltyError::ConsentNotGiven
    );
    assert_eq!(
        service.spending_by_category("carol").await.unwrap_err(),
        LoyaltyError::ConsentNotGiven
    );
    assert_eq!(service.transactions().calls(), 0);
}

#[tokio::test]
async fn test_consent_given_later_unlocks_operations() {
    let service = create_test_service();
    let mut user = register_user(service.users(), "dave", false).await;
    assert!(service.list_transactions("dave").await.is_err());

    user.consent_given = true;
    service.users().update_user(user).await.unwrap();
    assert!(service.list_transactions("dave").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_transaction_starts_unprocessed_with_fresh_id() {
    let service = create_test_service();
    let user = register_user(service.users(), "alice", true).await;

    let mut ids = HashSet::new();
    for _ in 0..3 {
        let tx = service
            .create_transaction("alice", "coffee".to_string(), "dining".to_string(), dec("4.50"))
            .await
            .unwrap();
        assert!(!tx.processed);
        assert!(tx.points_earned.is_none());
        assert_eq!(tx.user_id, user.user_id);
        assert!(ids.insert(tx.transaction_id));
    }

    let stored = service.list_transactions("alice").await.unwrap();
    assert_eq!(stored.len(), 3);
    assert!(stored.iter().all(|tx| !tx.processed));
    assert!(stored.windows(2).all(|pair| pair[0].date <= pair[1].date));
}

#[tokio::test]
async fn test_list_only_returns_callers_transactions() {
    let service = create_test_service();
    register_user(service.users(), "alice", true).await;
    let bob = register_user(service.users(), "bob", true).await;

    service
        .create_transaction("alice", "coffee".to_string(), "dining".to_string(), dec("4.50"))
        .await
        .unwrap();
    service
        .create_transaction("bob", "train".to_string(), "travel".to_string(), dec("12.00"))
        .await
        .unwrap();

    let bobs = service.list_transactions("bob").await.unwrap();
    assert_eq!(bobs.len(), 1);
    assert_eq!(bobs[0].user_id, bob.user_id);
    assert_eq!(bobs[0].transaction_name, "train");
}

#[tokio::test]
async fn test_spending_is_summed_per_category() {
    let service = create_test_service();
    register_user(service.users(), "alice", true).await;
    register_user(service.users(), "bob", true).await;

    for (name, category, amount) in [
        ("coffee", "dining", "4.50"),
        ("lunch", "dining", "12.25"),
        ("train", "travel", "30"),
    ] {
        service
            .create_transaction("alice", name.to_string(), category.to_string(), dec(amount))
            .await
            .unwrap();
    }
    service
        .create_transaction("bob", "dinner".to_string(), "dining".to_string(), dec("80"))
        .await
        .unwrap();

    let spending = service.spending_by_category("alice").await.unwrap();
    assert_eq!(spending.len(), 2);
    assert_eq!(spending[0].category.as_deref(), Some("dining"));
    assert_eq!(spending[0].amount, dec("16.75"));
    assert_eq!(spending[1].category.as_deref(), Some("travel"));
    assert_eq!(spending[1].amount, dec("30"));
}

#[tokio::test]
async fn test_create_records_app_log() {
    let service = create_test_service();
    let user = register_user(service.users(), "alice", true).await;
    let tx = service
        .create_transaction("alice", "coffee".to_string(), "dining".to_string(), dec("4.50"))
        .await
        .unwrap();

    let logs = service.get_app_logs().await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, TRANSACTION_CREATED);
    assert_eq!(logs[0].user_id.as_deref(), Some(user.user_id.as_str()));
    assert_eq!(logs[0].details["transaction_id"], tx.transaction_id);
}

#[tokio::test]
async fn test_unlabelled_spending_is_listed_first() {
    let service = create_test_service();
    let user = register_user(service.users(), "alice", true).await;
    let coffee = service
        .create_transaction("alice", "coffee".to_string(), "dining".to_string(), dec("4.50"))
        .await
        .unwrap();
    service
        .create_transaction("alice", "book".to_string(), "leisure".to_string(), dec("20"))
        .await
        .unwrap();
    service
        .reward_transaction(&coffee.transaction_id, &user.user_id, None, BigDecimal::from(5))
        .await
        .unwrap();

    let spending = service.spending_by_category("alice").await.unwrap();
    assert_eq!(spending.len(), 2);
    assert_eq!(spending[0].category, None);
    assert_eq!(spending[0].amount, dec("4.50"));
    assert_eq!(spending[1].category.as_deref(), Some("leisure"));
}

#[tokio::test]
async fn test_same_date_transactions_are_ordered_by_id() {
    let service = create_test_service();
    let user = register_user(service.users(), "alice", true).await;
    let date = Utc::now();
    for id in ["ffffffff-0000-4000-8000-000000000000", "00000000-0000-4000-8000-000000000000"] {
        service
            .transactions()
            .create_transaction(Transaction {
                transaction_id: id.to_string(),
                user_id: user.user_id.clone(),
                transaction_name: "coffee".to_string(),
                category: Some("dining".to_string()),
                amount: dec("4.50"),
                points_earned: None,
                processed: false,
                date,
            })
            .await
            .unwrap();
    }

    let listed = service.list_transactions("alice").await.unwrap();
    let ids: Vec<&str> = listed.iter().map(|tx| tx.transaction_id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["00000000-0000-4000-8000-000000000000", "ffffffff-0000-4000-8000-000000000000"]
    );
}
