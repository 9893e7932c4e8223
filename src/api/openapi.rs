use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::{
    api::models::{CreateTransactionRequest, ErrorResponse, RewardTransactionRequest},
    core::models::{audit::AppLog, category::Category, transaction::Transaction, user::User},
};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "Bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_transaction,
        super::handlers::get_transactions,
        super::handlers::get_spending_by_category,
        super::handlers::reward_transaction,
        super::handlers::get_app_logs
    ),
    components(schemas(
        CreateTransactionRequest,
        RewardTransactionRequest,
        ErrorResponse,
        User,
        Transaction,
        Category,
        AppLog
    )),
    modifiers(&BearerAuth),
    info(
        title = "Loyalty API",
        description = "API for recording loyalty program transactions and their rewards",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
