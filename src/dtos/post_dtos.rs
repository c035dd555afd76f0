use serde::{Deserialize, Serialize};

use crate::dtos::to_iso_string;
use crate::ids::{IdParam, IdValue};
use crate::models::post::Post;

#[derive(Debug, Deserialize)]
pub struct CreatePostDTO {
    pub title: Option<String>,
    pub content: Option<String>,
    pub user_id: Option<IdParam>,
    pub category_id: Option<IdParam>,
    pub date: Option<String>,
}

/// PUT body. `content` is required; the rest only changes when supplied.
/// An empty-string `category_id` clears the field.
#[derive(Debug, Deserialize)]
pub struct UpdatePostDTO {
    pub title: Option<String>,
    pub content: Option<String>,
    pub user_id: Option<IdParam>,
    pub category_id: Option<IdParam>,
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostOut {
    #[serde(rename = "_id")]
    pub id: IdValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    pub user_id: IdValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<IdValue>,
    pub date: String,
}

impl From<Post> for PostOut {
    fn from(post: Post) -> Self {
        PostOut {
            id: post.id.to_wire(),
            title: post.title,
            content: post.content,
            user_id: post.user_id.to_wire(),
            category_id: post.category_id.as_ref().map(|id| id.to_wire()),
            date: to_iso_string(post.date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::DocId;
    use bson::oid::ObjectId;

    #[test]
    fn references_are_stringified_and_dates_are_iso() {
        let user_oid = ObjectId::new();
        let post = Post {
            id: DocId::Oid(ObjectId::new()),
            title: None,
            content: "hello".into(),
            user_id: DocId::Oid(user_oid),
            category_id: Some(DocId::Int(4)),
            date: bson::DateTime::from_millis(1_704_067_200_000),
        };

        let json = serde_json::to_value(PostOut::from(post)).unwrap();
        assert_eq!(json["user_id"], serde_json::json!(user_oid.to_hex()));
        assert_eq!(json["category_id"], serde_json::json!(4));
        assert_eq!(json["date"], serde_json::json!("2024-01-01T00:00:00.000Z"));
        assert!(json.get("title").is_none());
    }
}
