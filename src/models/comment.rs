use serde::{Deserialize, Serialize};

use crate::ids::DocId;

/// New comments always reference posts and users by ObjectId; the fields are
/// `DocId` so documents seeded with integer references still deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: DocId,
    pub content: String,
    pub post_id: DocId,
    pub user_id: DocId,
    pub date: bson::DateTime,
}
