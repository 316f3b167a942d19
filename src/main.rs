use std::sync::Arc;

use color_eyre::eyre::Result;
use courtbook_api::config::ApiConfig;
use courtbook_db::{create_pool, schema::initialize_database, PgStore};
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
    let db_pool = create_pool(&config.database_url, config.db_max_connections).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Start API server
    let store = Arc::new(PgStore::new(db_pool));
    courtbook_api::start_server(config, store).await?;

    Ok(())
}
