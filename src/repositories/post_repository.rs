use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use crate::errors::ApiError;
use crate::ids::DocId;
use crate::models::post::Post;

pub struct PostRepository;

impl PostRepository {
    fn collection(db: &Database) -> Collection<Post> {
        db.collection("posts")
    }

    pub async fn insert(db: &Database, post: &Post) -> Result<(), ApiError> {
        Self::collection(db).insert_one(post).await?;
        Ok(())
    }

    pub async fn find_all(db: &Database) -> Result<Vec<Post>, ApiError> {
        Ok(Self::collection(db).find(doc! {}).await?.try_collect().await?)
    }

    pub async fn find_by_id(db: &Database, id: &DocId) -> Result<Option<Post>, ApiError> {
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

    pub async fn count(db: &Database) -> Result<u64, ApiError> {
        Ok(Self::collection(db).count_documents(doc! {}).await?)
    }

    pub async fn latest(db: &Database, limit: i64) -> Result<Vec<Post>, ApiError> {
        Ok(Self::collection(db)
            .find(doc! {})
            .sort(doc! { "date": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?)
    }

    pub async fn after(db: &Database, instant: bson::DateTime) -> Result<Vec<Post>, ApiError> {
        Ok(Self::collection(db)
            .find(doc! { "date": { "$gt": instant } })
            .sort(doc! { "date": -1 })
            .await?
            .try_collect()
            .await?)
    }

    pub async fn before(db: &Database, instant: bson::DateTime) -> Result<Vec<Post>, ApiError> {
        Ok(Self::collection(db)
            .find(doc! { "date": { "$lt": instant } })
            .sort(doc! { "date": -1 })
            .await?
            .try_collect()
            .await?)
    }

    /// Case-insensitive literal substring match over title and content.
    pub async fn search(db: &Database, query: &str) -> Result<Vec<Post>, ApiError> {
        let pattern = regex::escape(query);
        Ok(Self::collection(db)
            .find(doc! {
                "$or": [
                    { "title": { "$regex": &pattern, "$options": "i" } },
                    { "content": { "$regex": &pattern, "$options": "i" } },
                ]
            })
            .await?
            .try_collect()
            .await?)
    }

    pub async fn find_by_category(db: &Database, category_id: &DocId) -> Result<Vec<Post>, ApiError> {
        Ok(Self::collection(db)
            .find(doc! { "category_id": category_id })
            .await?
            .try_collect()
            .await?)
    }
}
