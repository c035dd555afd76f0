use std::env;

use anyhow::{Context, Result};
use mongodb::{Client, Database, options::ClientOptions};

/// Builds the shared database handle from the environment. The client pools
/// connections internally and is cloned freely across workers.
pub async fn get_database() -> Result<Database> {
    let uri = env::var("MONGODB_URI").context("MONGODB_URI not set")?;
    let db_name = env::var("MONGODB_DB").unwrap_or_else(|_| "social_network".to_string());

    let options = ClientOptions::parse(&uri)
        .await
        .context("failed to parse MONGODB_URI")?;
    let client = Client::with_options(options).context("failed to create mongodb client")?;

    Ok(client.database(&db_name))
}
