//! Create a password user.
//!
//! ```text
//! SEED_EMAIL=maverick@gmail.com SEED_PASSWORD=... DATABASE_URL=... vidnotes-seed
//! ```

use anyhow::Context;
use vidnotes_api::seed::{seed_user, SeedOutcome};
use vidnotes_api::telemetry;
use vidnotes_db::PgStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing("vidnotes_seed=info,vidnotes_api=info");

    let email = std::env::var("SEED_EMAIL").context("SEED_EMAIL must be set")?;
    let password = std::env::var("SEED_PASSWORD").context("SEED_PASSWORD must be set")?;
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = vidnotes_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    vidnotes_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let store = PgStore::new(pool);
    match seed_user(&store, &email, &password).await? {
        SeedOutcome::Created(user) => {
            tracing::info!(user_id = user.id, email = %user.email, "Created user");
        }
        SeedOutcome::AlreadyExists(user) => {
            tracing::info!(user_id = user.id, email = %user.email, "User already exists, left unchanged");
        }
    }

    Ok(())
}
