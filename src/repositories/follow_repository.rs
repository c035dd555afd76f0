use bson::{Document, doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use crate::errors::ApiError;
use crate::ids::DocId;
use crate::models::follow::Follow;

pub struct FollowRepository;

impl FollowRepository {
    fn collection(db: &Database) -> Collection<Follow> {
        db.collection("follows")
    }

    pub async fn insert(db: &Database, follow: &Follow) -> Result<(), ApiError> {
        Self::collection(db)
            .insert_one(follow)
            .await
            .map_err(|e| ApiError::from_insert(e, "This follow relationship already exists"))?;
        Ok(())
    }

    pub async fn find_all(db: &Database) -> Result<Vec<Follow>, ApiError> {
        Ok(Self::collection(db).find(doc! {}).await?.try_collect().await?)
    }

    pub async fn find_by_id(db: &Database, id: &DocId) -> Result<Option<Follow>, ApiError> {
        Ok(Self::collection(db).find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_by_pair(
        db: &Database,
        user_id: ObjectId,
        user_follow_id: ObjectId,
    ) -> Result<Option<Follow>, ApiError> {
        Ok(Self::collection(db)
            .find_one(doc! { "user_id": user_id, "user_follow_id": user_follow_id })
            .await?)
    }

    /// Everyone `user_id` follows.
    pub async fn by_follower(db: &Database, user_id: ObjectId) -> Result<Vec<Follow>, ApiError> {
        Ok(Self::collection(db)
            .find(doc! { "user_id": user_id })
            .await?
            .try_collect()
            .await?)
    }

    /// Everyone following `user_follow_id`.
    pub async fn by_followed(
        db: &Database,
        user_follow_id: ObjectId,
    ) -> Result<Vec<Follow>, ApiError> {
        Ok(Self::collection(db)
            .find(doc! { "user_follow_id": user_follow_id })
            .await?
            .try_collect()
            .await?)
    }

    pub async fn delete(db: &Database, id: &DocId) -> Result<u64, ApiError> {
        Ok(Self::collection(db)
            .delete_one(doc! { "_id": id })
            .await?
            .deleted_count)
    }

    pub async fn delete_by_pair(
        db: &Database,
        user_id: ObjectId,
        user_follow_id: ObjectId,
    ) -> Result<u64, ApiError> {
        Ok(Self::collection(db)
            .delete_one(doc! { "user_id": user_id, "user_follow_id": user_follow_id })
            .await?
            .deleted_count)
    }

    /// Groups follows by followed user, counts followers, joins the user
    /// documents and merges the count in. Identifier types match across the
    /// join because both sides go through the same input normalization.
    pub async fn most_followed(db: &Database, limit: i64) -> Result<Vec<Document>, ApiError> {
        let pipeline = vec![
            doc! { "$group": { "_id": "$user_follow_id", "followerCount": { "$sum": 1 } } },
            doc! { "$sort": { "followerCount": -1 } },
            doc! { "$limit": limit },
            doc! { "$lookup": {
                "from": "users",
                "localField": "_id",
                "foreignField": "_id",
                "as": "userInfo",
            } },
            doc! { "$unwind": "$userInfo" },
            doc! { "$replaceRoot": { "newRoot": {
                "$mergeObjects": ["$userInfo", { "followerCount": "$followerCount" }]
            } } },
        ];

        Ok(db
            .collection::<Document>("follows")
            .aggregate(pipeline)
            .await?
            .try_collect()
            .await?)
    }
}
