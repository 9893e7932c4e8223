pub mod in_memory;

use crate::core::errors::LoyaltyError;
use crate::core::models::audit::AppLog;
use async_trait::async_trait;

/// Action log kept alongside tracing output. Writes happen after the store commit and are
/// best-effort: a failure here never undoes or fails the operation that produced the entry.
#[async_trait]
pub trait LoggingService: Send + Sync {
    async fn record(&self, entry: AppLog) -> Result<(), LoyaltyError>;
    async fn get_logs(&self) -> Result<Vec<AppLog>, LoyaltyError>;
}
