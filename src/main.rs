use axum::{Router, http::header, routing::get};
use loyalty::{
    api::{handlers::api_routes, openapi::ApiDoc},
    config::CONFIG,
    core::{models::user::User, services::LoyaltyService},
    infrastructure::{
        logging::in_memory::InMemoryLogging,
        storage::{
            UserStore,
            in_memory::{InMemoryTransactionStore, InMemoryUserStore},
        },
    },
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&CONFIG.log_level))
        .init();
    info!("Starting with {:?}", *CONFIG);

    let users = InMemoryUserStore::new();
    for seed in &CONFIG.seed_users {
        users
            .create_user(User::new(seed.registry_id.clone(), seed.consent_given))
            .await?;
    }
    info!("Seeded {} users", CONFIG.seed_users.len());
    let transactions = InMemoryTransactionStore::new();
    let logging = InMemoryLogging::new();
    let service = Arc::new(LoyaltyService::new(
        users,
        transactions,
        logging,
        CONFIG.jwt_secret.clone(),
    ));

    let app = Router::new()
        .route("/", get(|| async { "OK" }))
        .nest("/api", api_routes(service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(CONFIG.request_timeout_secs)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([http::Method::GET, http::Method::POST, http::Method::PUT])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([127, 0, 0, 1], CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
