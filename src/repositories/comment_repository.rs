use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use crate::errors::ApiError;
use crate::ids::DocId;
use crate::models::comment::Comment;

pub struct CommentRepository;

impl CommentRepository {
    fn collection(db: &Database) -> Collection<Comment> {
        db.collection("comments")
    }

    pub async fn insert(db: &Database, comment: &Comment) -> Result<(), ApiError> {
        Self::collection(db).insert_one(comment).await?;
        Ok(())
    }

    pub async fn find_all(db: &Database) -> Result<Vec<Comment>, ApiError> {
        Ok(Self::collection(db).find(doc! {}).await?.try_collect().await?)
    }

    pub async fn find_by_id(db: &Database, id: &DocId) -> Result<Option<Comment>, ApiError> {
        Ok(Self::collection(db).find_one(doc! { "_id": id }).await?)
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

    pub async fn count_by_post(db: &Database, post_id: &DocId) -> Result<u64, ApiError> {
        Ok(Self::collection(db)
            .count_documents(doc! { "post_id": post_id })
            .await?)
    }
}
