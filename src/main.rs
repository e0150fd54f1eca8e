use coachbook_api::config::ApiConfig;
use coachbook_db::{create_pool, schema::initialize_database};
use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url)
        .await
        .wrap_err("Failed to connect to the appointment database")?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Start API server
    coachbook_api::start_server(config, db_pool).await?;

    Ok(())
}
