use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Spending of one user summed per category label. Computed on read.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Category {
    pub category: Option<String>,
    #[schema(value_type = String, example = "42.00")]
    pub amount: BigDecimal,
}
