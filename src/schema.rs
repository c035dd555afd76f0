//! Idempotent collection and index setup, run once at boot.
//!
//! The unique indexes are the real enforcement point for the uniqueness
//! invariants; the application-level pre-checks in the handlers only exist to
//! answer 409 before the store has to reject the write.

use bson::{Document, doc};
use log::info;
use mongodb::error::ErrorKind;
use mongodb::options::IndexOptions;
use mongodb::{Database, IndexModel};

const COLLECTIONS: [&str; 6] = ["users", "posts", "comments", "likes", "follows", "categories"];

pub async fn ensure_schema(db: &Database) -> Result<(), mongodb::error::Error> {
    for name in COLLECTIONS {
        if let Err(err) = db.create_collection(name).await {
            if !is_namespace_exists(&err) {
                return Err(err);
            }
        }
    }

    unique_index(db, "users", doc! { "username": 1 }).await?;
    unique_index(db, "categories", doc! { "name": 1 }).await?;
    unique_index(db, "likes", doc! { "post_id": 1, "user_id": 1 }).await?;
    unique_index(db, "follows", doc! { "user_id": 1, "user_follow_id": 1 }).await?;

    info!("schema ready: {} collections, unique indexes in place", COLLECTIONS.len());
    Ok(())
}

async fn unique_index(
    db: &Database,
    collection: &str,
    keys: Document,
) -> Result<(), mongodb::error::Error> {
    db.collection::<Document>(collection)
        .create_index(
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().unique(true).build())
                .build(),
        )
        .await?;
    Ok(())
}

// NamespaceExists: the only creation failure that is safe to ignore.
fn is_namespace_exists(err: &mongodb::error::Error) -> bool {
    matches!(err.kind.as_ref(), ErrorKind::Command(command_error) if command_error.code == 48)
}
