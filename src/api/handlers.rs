use crate::{
    api::models::*,
    auth::jwt::Claims,
    core::{
        errors::LoyaltyError,
        models::{audit::AppLog, category::Category, transaction::Transaction},
        services::LoyaltyService,
    },
    infrastructure::{
        logging::in_memory::InMemoryLogging,
        storage::in_memory::{InMemoryTransactionStore, InMemoryUserStore},
    },
};
use axum::{
    Extension, Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::IntoResponse,
};
use http::header;

use std::sync::Arc;

pub type AppService = LoyaltyService<InMemoryLogging, InMemoryUserStore, InMemoryTransactionStore>;

/// Resolves the caller identity from the bearer token.
async fn auth_middleware(
    State(service): State<Arc<AppService>>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| LoyaltyError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| LoyaltyError::Unauthorized("Invalid Authorization header".to_string()))?;

    let claims = service.validate_token(token)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

async fn admin_middleware(req: Request<axum::body::Body>, next: Next) -> Result<impl IntoResponse, ApiError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .ok_or_else(|| LoyaltyError::Unauthorized("Missing caller identity".to_string()))?;
    if !claims.is_admin() {
        return Err(LoyaltyError::Forbidden(format!("Caller {} lacks the admin role", claims.sub)).into());
    }
    Ok(next.run(req).await)
}

// Define API routes
pub fn api_routes(service: Arc<AppService>) -> Router {
    let admin_routes = Router::new()
        .route(
            "/v1/transactions/reward/{transaction_id}",
            axum::routing::put(reward_transaction),
        )
        .route("/logs", axum::routing::get(get_app_logs))
        .route_layer(middleware::from_fn(admin_middleware));

    let protected_routes = Router::new()
        .route(
            "/v1/transactions",
            axum::routing::post(create_transaction).get(get_transactions),
        )
        .route("/v1/transactions/spending", axum::routing::get(get_spending_by_category))
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(service.clone(), auth_middleware));

    Router::new().merge(protected_routes).with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 204, description = "Transaction created"),
        (status = 400, description = "User is not registered", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 409, description = "User has not consented to program", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn create_transaction(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateTransactionRequest>,
) -> Result<StatusCode, ApiError> {
    service
        .create_transaction(&claims.sub, req.transaction_name, req.category, req.amount)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    responses(
        (status = 200, description = "Transactions of the caller, oldest first", body = Vec<Transaction>),
        (status = 400, description = "User is not registered", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 409, description = "User has not consented to program", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn get_transactions(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let transactions = service.list_transactions(&claims.sub).await?;
    Ok(Json(transactions))
}

#[utoipa::path(
    get,
    path = "/api/v1/transactions/spending",
    responses(
        (status = 200, description = "Spending of the caller per category", body = Vec<Category>),
        (status = 400, description = "User is not registered", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 409, description = "User has not consented to program", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn get_spending_by_category(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = service.spending_by_category(&claims.sub).await?;
    Ok(Json(categories))
}

#[utoipa::path(
    put,
    path = "/api/v1/transactions/reward/{transaction_id}",
    params(
        ("transaction_id" = String, Path, description = "ID of the transaction to reward")
    ),
    request_body = RewardTransactionRequest,
    responses(
        (status = 204, description = "Transaction rewarded"),
        (status = 400, description = "Invalid id or transaction already processed", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn reward_transaction(
    State(service): State<Arc<AppService>>,
    Path(transaction_id): Path<String>,
    Json(req): Json<RewardTransactionRequest>,
) -> Result<StatusCode, ApiError> {
    service
        .reward_transaction(&transaction_id, &req.user_id, req.category, req.points_earned)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Application logs retrieved successfully", body = Vec<AppLog>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn get_app_logs(State(service): State<Arc<AppService>>) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service.get_app_logs().await?;
    Ok(Json(logs))
}
