use crate::core::errors::LoyaltyError;
use crate::core::models::audit::AppLog;
use crate::infrastructure::logging::LoggingService;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const DEFAULT_LOG_CAPACITY: usize = 10_000;

/// Keeps the most recent `capacity` entries, oldest first.
#[derive(Clone)]
pub struct InMemoryLogging {
    entries: Arc<RwLock<VecDeque<AppLog>>>,
    capacity: usize,
}

impl Default for InMemoryLogging {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLogging {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        InMemoryLogging {
            entries: Arc::new(RwLock::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }
}

#[async_trait]
impl LoggingService for InMemoryLogging {
    async fn record(&self, entry: AppLog) -> Result<(), LoyaltyError> {
        let mut entries = self.entries.write().await;
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
        Ok(())
    }

    async fn get_logs(&self) -> Result<Vec<AppLog>, LoyaltyError> {
        Ok(self.entries.read().await.iter().cloned().collect())
    }
}
