use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single recorded purchase or event owned by one user.
///
/// `category` may be replaced and `points_earned` set exactly once, when the
/// transaction is rewarded and `processed` flips to `true`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: String,
    pub user_id: String,
    pub transaction_name: String,
    pub category: Option<String>,
    #[schema(value_type = String, example = "4.50")]
    pub amount: BigDecimal,
    #[schema(value_type = Option<String>, example = "10")]
    pub points_earned: Option<BigDecimal>,
    pub processed: bool,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub date: DateTime<Utc>,
}

impl Transaction {
    pub fn is_processed(&self) -> bool {
        self.processed
    }

    /// Applies the reward annotation, moving the transaction to its terminal state.
    pub fn reward(&mut self, category: Option<String>, points_earned: BigDecimal) {
        self.category = category;
        self.points_earned = Some(points_earned);
        self.processed = true;
    }
}
