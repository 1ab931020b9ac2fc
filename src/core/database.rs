use crate::core::config::DatabaseConfig;
use mongodb::{bson::doc, options::ClientOptions, Client, Database};
use std::time::Duration;

/// Connects to MongoDB and verifies the server answers a ping.
///
/// The returned handle shares the client's connection pool; clone it freely.
pub async fn connect(config: &DatabaseConfig) -> Result<Database, mongodb::error::Error> {
    let mut options = ClientOptions::parse(&config.uri).await?;
    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.max_idle_time = Some(Duration::from_secs(config.max_idle_time_secs));

    let client = Client::with_options(options)?;
    let database = client.database(&config.database);
    database.run_command(doc! { "ping": 1 }).await?;

    Ok(database)
}
