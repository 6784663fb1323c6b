//! Populate an empty database with sample spaces.
//!
//! Reads the same environment as the server (`DATABASE_URL` etc.) and applies
//! pending migrations first.

use anyhow::Context;
use space_rental_api::config::{self, ServerConfig};
use space_rental_api::seed::{self, SeedOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    config::init_tracing(config.log_format);

    let pool = space_rental_db::create_pool(&config.database_url, config.db_max_connections)
        .await
        .context("failed to connect to database")?;
    space_rental_db::run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;

    let outcome = seed::seed(&pool)
        .await
        .context("seeding failed")?;
    match outcome {
        SeedOutcome::Skipped { existing } => {
            println!("Database already has {existing} spaces. Skipping sample data insertion.")
        }
        SeedOutcome::Inserted(n) => println!("Added {n} sample spaces to the database."),
    }

    pool.close().await;
    Ok(())
}
