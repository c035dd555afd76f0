use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use crate::errors::ApiError;
use crate::ids::DocId;
use crate::models::category::Category;

pub struct CategoryRepository;

impl CategoryRepository {
    fn collection(db: &Database) -> Collection<Category> {
        db.collection("categories")
    }

    pub async fn insert(db: &Database, category: &Category) -> Result<(), ApiError> {
        Self::collection(db)
            .insert_one(category)
            .await
            .map_err(|e| ApiError::from_insert(e, "A category with this name already exists"))?;
        Ok(())
    }

    pub async fn find_all(db: &Database) -> Result<Vec<Category>, ApiError> {
        Ok(Self::collection(db).find(doc! {}).await?.try_collect().await?)
    }

    pub async fn find_by_id(db: &Database, id: &DocId) -> Result<Option<Category>, ApiError> {
        Ok(Self::collection(db).find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_by_name(db: &Database, name: &str) -> Result<Option<Category>, ApiError> {
        Ok(Self::collection(db).find_one(doc! { "name": name }).await?)
    }

    pub async fn name_taken_by_other(
        db: &Database,
        name: &str,
        excluded: &DocId,
    ) -> Result<bool, ApiError> {
        Ok(Self::collection(db)
            .find_one(doc! { "name": name, "_id": { "$ne": excluded } })
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
}
