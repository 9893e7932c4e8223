mod transaction_tests;

use crate::core::errors::LoyaltyError;
use crate::core::models::{audit::AppLog, category::Category, transaction::Transaction, user::User};
use crate::core::services::LoyaltyService;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::{InMemoryTransactionStore, InMemoryUserStore};
use crate::infrastructure::storage::{TransactionStore, UserStore};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const TEST_SECRET: &str = "test-secret";

pub fn create_test_service() -> LoyaltyService<InMemoryLogging, InMemoryUserStore, InMemoryTransactionStore> {
    let users = InMemoryUserStore::new();
    let transactions = InMemoryTransactionStore::new();
    let logging = InMemoryLogging::new();
    LoyaltyService::new(users, transactions, logging, TEST_SECRET.to_string())
}

/// Transaction store that counts every call made against it.
#[derive(Clone, Default)]
pub struct CountingTransactionStore {
    inner: InMemoryTransactionStore,
    calls: Arc<AtomicUsize>,
}

impl CountingTransactionStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl TransactionStore for CountingTransactionStore {
    async fn create_transaction(&self, transaction: Transaction) -> Result<(), LoyaltyError> {
        self.hit();
        self.inner.create_transaction(transaction).await
    }

    async fn find_transaction(
        &self,
        transaction_id: &str,
        user_id: &str,
    ) -> Result<Option<Transaction>, LoyaltyError> {
        self.hit();
        self.inner.find_transaction(transaction_id, user_id).await
    }

    async fn find_transactions_by_user(&self, user_id: &str) -> Result<Vec<Transaction>, LoyaltyError> {
        self.hit();
        self.inner.find_transactions_by_user(user_id).await
    }

    async fn group_categories_for_user(&self, user_id: &str) -> Result<Vec<Category>, LoyaltyError> {
        self.hit();
        self.inner.group_categories_for_user(user_id).await
    }

    async fn update_transaction_if_unprocessed(&self, transaction: Transaction) -> Result<bool, LoyaltyError> {
        self.hit();
        self.inner.update_transaction_if_unprocessed(transaction).await
    }
}

pub fn create_counting_service() -> LoyaltyService<InMemoryLogging, InMemoryUserStore, CountingTransactionStore> {
    LoyaltyService::new(
        InMemoryUserStore::new(),
        CountingTransactionStore::default(),
        InMemoryLogging::new(),
        TEST_SECRET.to_string(),
    )
}

pub async fn register_user<U: UserStore>(users: &U, subject: &str, consent_given: bool) -> User {
    let user = User::new(subject, consent_given);
    users.create_user(user.clone()).await.unwrap();
    user
}

/// Action log whose writes always fail.
#[derive(Clone, Default)]
pub struct UnavailableLogging;

#[async_trait]
impl LoggingService for UnavailableLogging {
    async fn record(&self, _entry: AppLog) -> Result<(), LoyaltyError> {
        Err(LoyaltyError::LoggingError("log sink unavailable".to_string()))
    }

    async fn get_logs(&self) -> Result<Vec<AppLog>, LoyaltyError> {
        Err(LoyaltyError::LoggingError("log sink unavailable".to_string()))
    }
}
