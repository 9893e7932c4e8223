use axum::{Json, http::StatusCode, response::IntoResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::LoyaltyError;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub transaction_name: String,
    pub category: String,
    #[schema(value_type = String, example = "4.50")]
    pub amount: BigDecimal,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RewardTransactionRequest {
    pub user_id: String,
    pub category: Option<String>,
    #[schema(value_type = String, example = "10")]
    pub points_earned: BigDecimal,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for LoyaltyError to implement IntoResponse
pub struct ApiError(pub LoyaltyError);

impl From<LoyaltyError> for ApiError {
    fn from(err: LoyaltyError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self.0 {
            LoyaltyError::UserNotRegistered => StatusCode::BAD_REQUEST,
            LoyaltyError::ConsentNotGiven => StatusCode::CONFLICT,
            LoyaltyError::InvalidTransactionId(_) | LoyaltyError::InvalidUserId(_) => StatusCode::BAD_REQUEST,
            LoyaltyError::TransactionNotFound(_) => StatusCode::NOT_FOUND,
            LoyaltyError::TransactionAlreadyProcessed(_) => StatusCode::BAD_REQUEST,
            LoyaltyError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            LoyaltyError::Forbidden(_) => StatusCode::FORBIDDEN,
            LoyaltyError::StorageError(_)
            | LoyaltyError::LoggingError(_)
            | LoyaltyError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        (status, Json(ErrorResponse { error: self.0.to_string() })).into_response()
    }
}
