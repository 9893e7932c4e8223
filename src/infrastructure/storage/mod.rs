use crate::core::errors::LoyaltyError;
use crate::core::models::{category::Category, transaction::Transaction, user::User};
use async_trait::async_trait;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: User) -> Result<(), LoyaltyError>;
    async fn update_user(&self, user: User) -> Result<(), LoyaltyError>;
    async fn find_user_by_registry_id(&self, subject: &str) -> Result<Option<User>, LoyaltyError>;
}

#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn create_transaction(&self, transaction: Transaction) -> Result<(), LoyaltyError>;
    async fn find_transaction(&self, transaction_id: &str, user_id: &str)
    -> Result<Option<Transaction>, LoyaltyError>;
    /// Ordered by date, then by transaction id.
    async fn find_transactions_by_user(&self, user_id: &str) -> Result<Vec<Transaction>, LoyaltyError>;
    /// Ordered by category label, unlabelled spending first.
    async fn group_categories_for_user(&self, user_id: &str) -> Result<Vec<Category>, LoyaltyError>;
    /// Replaces the stored transaction only while the stored copy is still unprocessed.
    /// Returns `false` when nothing was written.
    async fn update_transaction_if_unprocessed(&self, transaction: Transaction) -> Result<bool, LoyaltyError>;
}

pub mod in_memory;
