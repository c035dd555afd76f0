use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use crate::errors::ApiError;
use crate::ids::DocId;
use crate::models::user::User;

pub struct UserRepository;

impl UserRepository {
    fn collection(db: &Database) -> Collection<User> {
        db.collection("users")
    }

    pub async fn insert(db: &Database, user: &User) -> Result<(), ApiError> {
        Self::collection(db)
            .insert_one(user)
            .await
            .map_err(|e| ApiError::from_insert(e, "Username already taken"))?;
        Ok(())
    }

    pub async fn find_all(db: &Database) -> Result<Vec<User>, ApiError> {
        Ok(Self::collection(db).find(doc! {}).await?.try_collect().await?)
    }

    pub async fn find_by_id(db: &Database, id: &DocId) -> Result<Option<User>, ApiError> {
        Ok(Self::collection(db).find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_by_username(db: &Database, username: &str) -> Result<Option<User>, ApiError> {
        Ok(Self::collection(db)
            .find_one(doc! { "username": username })
            .await?)
    }

    /// Uniqueness re-check for updates: is the name taken by a different
    /// document than the one being updated?
    pub async fn username_taken_by_other(
        db: &Database,
        username: &str,
        excluded: &DocId,
    ) -> Result<bool, ApiError> {
        Ok(Self::collection(db)
            .find_one(doc! { "username": username, "_id": { "$ne": excluded } })
            .await?
            .is_some())
    }

    pub async fn update(db: &Database, id: &DocId, set: Document) -> Result<(), ApiError> {
        Self::collection(db)
            .update_one(doc! { "_id": id }, doc! { "$set": set })
            .await?;
        Ok(())
    }

    pub async fn delete(db: &Database, id: &DocId) -> Result<u64, ApiError> {
        Ok(Self::collection(db)
            .delete_one(doc! { "_id": id })
            .await?
            .deleted_count)
    }

    pub async fn count(db: &Database) -> Result<u64, ApiError> {
        Ok(Self::collection(db).count_documents(doc! {}).await?)
    }

    /// One page of the `username` projection plus the collection total.
    pub async fn username_page(
        db: &Database,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<Document>, u64), ApiError> {
        let collection = db.collection::<Document>("users");
        let total = collection.count_documents(doc! {}).await?;
        let docs = collection
            .find(doc! {})
            .projection(doc! { "username": 1 })
            .skip((page - 1) * limit)
            .limit(limit as i64)
            .await?
            .try_collect()
            .await?;
        Ok((docs, total))
    }
}
