use serde::{Deserialize, Serialize};

use crate::ids::DocId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: DocId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    pub user_id: DocId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<DocId>,
    pub date: bson::DateTime,
}
