//! # Database Connector
//!
//! One process-wide MongoDB connection, established at startup. The driver
//! connects lazily, so a `ping` round-trip forces failures to show up here
//! instead of on the first request. The binary treats failure as fatal
//! (fail-fast, no retry) and exits.

use anyhow::Context;
use mongodb::bson::doc;
use mongodb::{Client, Database};
use tracing::info;

/// Connect to the document store and verify the connection with a ping.
///
/// The returned handle is cloned into request state and lives for the
/// process lifetime; there is no explicit teardown.
pub async fn connect(uri: &str, database: &str) -> anyhow::Result<Database> {
    let client = Client::with_uri_str(uri)
        .await
        .context("Invalid MongoDB connection string")?;

    let db = client.database(database);

    db.run_command(doc! { "ping": 1 })
        .await
        .context("MongoDB ping failed")?;

    info!("Connected to MongoDB database '{}'", database);

    Ok(db)
}

/// Build a database handle without contacting the server.
///
/// The driver defers I/O until the first operation, so this is safe in
/// environments with no MongoDB available. Used by tests that exercise
/// request state but never touch the store.
#[cfg(test)]
pub async fn lazy_handle() -> Database {
    Client::with_uri_str("mongodb://localhost:27017")
        .await
        .expect("static URI parses")
        .database("storefront-test")
}
