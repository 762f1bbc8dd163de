use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bodyshop_backend::config::AppConfig;
use bodyshop_backend::services::{email::EmailService, sms::SmsService};
use bodyshop_backend::{build_router, AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bodyshop_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Connect to database
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let sms = SmsService::new(config.sms.clone());
    let email = EmailService::new(config.email.clone());
    if !sms.is_enabled() {
        tracing::warn!("SMS notifications disabled: Twilio is not configured");
    }
    if !email.is_enabled() {
        tracing::warn!("Email notifications disabled: no provider configured");
    }

    let bind_addr = config.bind_addr.clone();
    let state = AppState {
        db,
        config,
        sms,
        email,
    };

    // Build router
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind server address");

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
