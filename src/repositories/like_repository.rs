use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use crate::errors::ApiError;
use crate::ids::DocId;
use crate::models::like::Like;

pub struct LikeRepository;

impl LikeRepository {
    fn collection(db: &Database) -> Collection<Like> {
        db.collection("likes")
    }

    pub async fn insert(db: &Database, like: &Like) -> Result<(), ApiError> {
        Self::collection(db)
            .insert_one(like)
            .await
            .map_err(|e| ApiError::from_insert(e, "This like already exists"))?;
        Ok(())
    }

    pub async fn find_all(db: &Database) -> Result<Vec<Like>, ApiError> {
        Ok(Self::collection(db).find(doc! {}).await?.try_collect().await?)
    }

    pub async fn find_by_id(db: &Database, id: &DocId) -> Result<Option<Like>, ApiError> {
        Ok(Self::collection(db).find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_by_pair(
        db: &Database,
        post_id: ObjectId,
        user_id: ObjectId,
    ) -> Result<Option<Like>, ApiError> {
        Ok(Self::collection(db)
            .find_one(doc! { "post_id": post_id, "user_id": user_id })
            .await?)
    }

    pub async fn delete(db: &Database, id: &DocId) -> Result<u64, ApiError> {
        Ok(Self::collection(db)
            .delete_one(doc! { "_id": id })
            .await?
            .deleted_count)
    }

    pub async fn count_by_post(db: &Database, post_id: &DocId) -> Result<u64, ApiError> {
        Ok(Self::collection(db)
            .count_documents(doc! { "post_id": post_id })
            .await?)
    }
}
