//! Seed or update a staff dashboard account.
//!
//! The auth provider owns credentials; this table only maps its subject id
//! to a person the API will accept. Run once per staff member:
//!
//!   cargo run --bin seed_staff_user -- <auth_id> <email> <display_name> [role]

use std::env;

use sea_orm::{ActiveModelTrait, ColumnTrait, Database, EntityTrait, QueryFilter, Set};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bodyshop_backend::entities::prelude::StaffUsers;
use bodyshop_backend::entities::staff_users;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bodyshop_backend=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: cargo run --bin seed_staff_user <auth_id> <email> <display_name> [role]");
        eprintln!("Example: cargo run --bin seed_staff_user auth0|64f1 jane@shop.com \"Jane Smith\" admin");
        std::process::exit(1);
    }
    let auth_id = args[1].clone();
    let email = args[2].trim().to_lowercase();
    let display_name = args[3].clone();
    let role = args.get(4).cloned().unwrap_or_else(|| "staff".to_string());

    // Connect to database
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let existing = StaffUsers::find()
        .filter(staff_users::Column::AuthId.eq(auth_id.as_str()))
        .one(&db)
        .await?;

    match existing {
        Some(user) => {
            let id = user.id;
            let mut active: staff_users::ActiveModel = user.into();
            active.email = Set(email);
            active.display_name = Set(display_name);
            active.role = Set(role);
            active.active = Set(true);
            let updated = active.update(&db).await?;
            tracing::info!(
                "Updated staff user {} (id {}, role {})",
                updated.display_name,
                id,
                updated.role
            );
        }
        None => {
            let user = staff_users::ActiveModel {
                auth_id: Set(auth_id),
                email: Set(email),
                display_name: Set(display_name),
                role: Set(role),
                active: Set(true),
                created_at: Set(chrono::Utc::now().into()),
                ..Default::default()
            };
            let created = user.insert(&db).await?;
            tracing::info!(
                "Created staff user {} (id {}, role {})",
                created.display_name,
                created.id,
                created.role
            );
        }
    }

    Ok(())
}
