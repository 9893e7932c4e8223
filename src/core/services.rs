use crate::auth::jwt::{Claims, JwtService};
use crate::constants::{TRANSACTION_CREATED, TRANSACTION_REWARDED};
use crate::core::errors::LoyaltyError;
use crate::core::models::{audit::AppLog, category::Category, transaction::Transaction, user::User};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::{TransactionStore, UserStore};
use bigdecimal::BigDecimal;
use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct LoyaltyService<L: LoggingService, U: UserStore, T: TransactionStore> {
    users: U,
    transactions: T,
    logging: L,
    jwt_service: JwtService,
}

impl<L: LoggingService, U: UserStore, T: TransactionStore> LoyaltyService<L, U, T> {
    pub fn new(users: U, transactions: T, logging: L, jwt_secret: String) -> Self {
        LoyaltyService {
            users,
            transactions,
            logging,
            jwt_service: JwtService::new(jwt_secret),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, LoyaltyError> {
        self.jwt_service.validate_token(token)
    }

    pub fn users(&self) -> &U {
        &self.users
    }

    pub fn transactions(&self) -> &T {
        &self.transactions
    }

    /// Resolves the caller to a registered user who has consented to the program.
    async fn resolve_consenting_user(&self, subject: &str) -> Result<User, LoyaltyError> {
        let user = self
            .users
            .find_user_by_registry_id(subject)
            .await?
            .ok_or(LoyaltyError::UserNotRegistered)?;
        if !user.consent_given {
            warn!("User {} has not consented to the program", user.user_id);
            return Err(LoyaltyError::ConsentNotGiven);
        }
        Ok(user)
    }

    /// The store write has already committed when this runs, so a failed log entry is only reported.
    async fn record_action(&self, entry: AppLog) {
        let action = entry.action.clone();
        if let Err(e) = self.logging.record(entry).await {
            warn!("Failed to record {} in the action log: {}", action, e);
        }
    }

    pub async fn create_transaction(
        &self,
        subject: &str,
        transaction_name: String,
        category: String,
        amount: BigDecimal,
    ) -> Result<Transaction, LoyaltyError> {
        let user = self.resolve_consenting_user(subject).await?;

        let transaction = Transaction {
            transaction_id: Uuid::new_v4().to_string(),
            user_id: user.user_id.clone(),
            transaction_name,
            category: Some(category),
            amount,
            points_earned: None,
            processed: false,
            date: Utc::now(),
        };
        self.transactions.create_transaction(transaction.clone()).await?;
        info!(
            "Created transaction {} for user {}",
            transaction.transaction_id, user.user_id
        );

        self.record_action(AppLog::new(
            TRANSACTION_CREATED,
            Some(user.user_id.as_str()),
            json!({
                "transaction_id": transaction.transaction_id,
                "category": transaction.category,
                "amount": transaction.amount.to_string(),
            }),
        ))
        .await;

        Ok(transaction)
    }

    pub async fn list_transactions(&self, subject: &str) -> Result<Vec<Transaction>, LoyaltyError> {
        let user = self.resolve_consenting_user(subject).await?;
        let transactions = self.transactions.find_transactions_by_user(&user.user_id).await?;
        debug!("Found {} transactions for user {}", transactions.len(), user.user_id);
        Ok(transactions)
    }

    pub async fn spending_by_category(&self, subject: &str) -> Result<Vec<Category>, LoyaltyError> {
        let user = self.resolve_consenting_user(subject).await?;
        self.transactions.group_categories_for_user(&user.user_id).await
    }

    /// Annotates an unprocessed transaction with its reward. A transaction is rewarded at most once.
    pub async fn reward_transaction(
        &self,
        transaction_id: &str,
        user_id: &str,
        category: Option<String>,
        points_earned: BigDecimal,
    ) -> Result<(), LoyaltyError> {
        Uuid::parse_str(transaction_id).map_err(|_| LoyaltyError::InvalidTransactionId(transaction_id.to_string()))?;
        Uuid::parse_str(user_id).map_err(|_| LoyaltyError::InvalidUserId(user_id.to_string()))?;

        let mut transaction = self
            .transactions
            .find_transaction(transaction_id, user_id)
            .await?
            .ok_or_else(|| LoyaltyError::TransactionNotFound(transaction_id.to_string()))?;
        if transaction.is_processed() {
            warn!("Transaction {} already processed", transaction_id);
            return Err(LoyaltyError::TransactionAlreadyProcessed(transaction_id.to_string()));
        }

        transaction.reward(category, points_earned);
        let points = transaction.points_earned.as_ref().map(ToString::to_string);
        if !self
            .transactions
            .update_transaction_if_unprocessed(transaction)
            .await?
        {
            warn!("Transaction {} was rewarded concurrently", transaction_id);
            return Err(LoyaltyError::TransactionAlreadyProcessed(transaction_id.to_string()));
        }
        info!("Rewarded transaction {} for user {}", transaction_id, user_id);

        self.record_action(AppLog::new(
            TRANSACTION_REWARDED,
            Some(user_id),
            json!({ "transaction_id": transaction_id, "points_earned": points }),
        ))
        .await;
        Ok(())
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, LoyaltyError> {
        self.logging.get_logs().await
    }
}
