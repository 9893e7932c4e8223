use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize, PartialEq, Eq)]
pub enum LoyaltyError {
    #[error("User is not registered")]
    UserNotRegistered,
    #[error("User has not consented to program")]
    ConsentNotGiven,
    #[error("Invalid transaction id: {0}")]
    InvalidTransactionId(String),
    #[error("Invalid user id: {0}")]
    InvalidUserId(String),
    #[error("Transaction {0} not found")]
    TransactionNotFound(String),
    #[error("Transaction {0} already processed")]
    TransactionAlreadyProcessed(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Logging error: {0}")]
    LoggingError(String),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}
