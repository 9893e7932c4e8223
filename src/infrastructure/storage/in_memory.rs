use crate::core::errors::LoyaltyError;
use crate::core::models::{category::Category, transaction::Transaction, user::User};
use crate::infrastructure::storage::{TransactionStore, UserStore};
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
    users_by_registry_id: Arc<RwLock<HashMap<String, String>>>, // registry_id -> user_id
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        InMemoryUserStore {
            users: Arc::new(RwLock::new(HashMap::new())),
            users_by_registry_id: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, user: User) -> Result<(), LoyaltyError> {
        let mut users_by_registry_id = self.users_by_registry_id.write().await;
        if users_by_registry_id.contains_key(&user.registry_id) {
            return Err(LoyaltyError::StorageError(format!(
                "Registry subject {} already bound to a user",
                user.registry_id
            )));
        }
        users_by_registry_id.insert(user.registry_id.clone(), user.user_id.clone());
        let mut users = self.users.write().await;
        users.insert(user.user_id.clone(), user);
        Ok(())
    }

    async fn update_user(&self, user: User) -> Result<(), LoyaltyError> {
        let users_by_registry_id = self.users_by_registry_id.read().await;
        match users_by_registry_id.get(&user.registry_id) {
            Some(user_id) if *user_id == user.user_id => {}
            _ => {
                return Err(LoyaltyError::StorageError(format!(
                    "User {} is not bound to registry subject {}",
                    user.user_id, user.registry_id
                )));
            }
        }
        let mut users = self.users.write().await;
        users.insert(user.user_id.clone(), user);
        Ok(())
    }

    async fn find_user_by_registry_id(&self, subject: &str) -> Result<Option<User>, LoyaltyError> {
        let user_id = self.users_by_registry_id.read().await.get(subject).cloned();
        Ok(match user_id {
            Some(id) => self.users.read().await.get(&id).cloned(),
            None => None,
        })
    }
}

#[derive(Clone, Default)]
pub struct InMemoryTransactionStore {
    transactions: Arc<RwLock<HashMap<String, Transaction>>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        InMemoryTransactionStore {
            transactions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn create_transaction(&self, transaction: Transaction) -> Result<(), LoyaltyError> {
        let mut transactions = self.transactions.write().await;
        if transactions.contains_key(&transaction.transaction_id) {
            return Err(LoyaltyError::StorageError(format!(
                "Transaction {} already exists",
                transaction.transaction_id
            )));
        }
        transactions.insert(transaction.transaction_id.clone(), transaction);
        Ok(())
    }

    async fn find_transaction(
        &self,
        transaction_id: &str,
        user_id: &str,
    ) -> Result<Option<Transaction>, LoyaltyError> {
        let transactions = self.transactions.read().await;
        Ok(transactions
            .get(transaction_id)
            .filter(|tx| tx.user_id == user_id)
            .cloned())
    }

    async fn find_transactions_by_user(&self, user_id: &str) -> Result<Vec<Transaction>, LoyaltyError> {
        let mut owned: Vec<Transaction> = self
            .transactions
            .read()
            .await
            .values()
            .filter(|tx| tx.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.transaction_id.cmp(&b.transaction_id))
        });
        Ok(owned)
    }

    async fn group_categories_for_user(&self, user_id: &str) -> Result<Vec<Category>, LoyaltyError> {
        let transactions = self.transactions.read().await;
        let mut totals: BTreeMap<Option<String>, BigDecimal> = BTreeMap::new();
        for tx in transactions.values().filter(|tx| tx.user_id == user_id) {
            *totals.entry(tx.category.clone()).or_default() += &tx.amount;
        }
        Ok(totals
            .into_iter()
            .map(|(category, amount)| Category { category, amount })
            .collect())
    }

    async fn update_transaction_if_unprocessed(&self, transaction: Transaction) -> Result<bool, LoyaltyError> {
        // check and write under one guard
        let mut transactions = self.transactions.write().await;
        match transactions.get_mut(&transaction.transaction_id) {
            Some(stored) if stored.user_id == transaction.user_id && !stored.processed => {
                *stored = transaction;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
