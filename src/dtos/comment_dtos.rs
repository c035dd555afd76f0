use serde::{Deserialize, Serialize};

use crate::dtos::to_iso_string;
use crate::ids::{IdParam, IdValue};
use crate::models::comment::Comment;

#[derive(Debug, Deserialize)]
pub struct CreateCommentDTO {
    pub content: Option<String>,
    pub post_id: Option<IdParam>,
    pub user_id: Option<IdParam>,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentDTO {
    pub content: Option<String>,
    pub post_id: Option<IdParam>,
    pub user_id: Option<IdParam>,
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommentOut {
    #[serde(rename = "_id")]
    pub id: IdValue,
    pub content: String,
    pub post_id: IdValue,
    pub user_id: IdValue,
    pub date: String,
}

impl From<Comment> for CommentOut {
    fn from(comment: Comment) -> Self {
        CommentOut {
            id: comment.id.to_wire(),
            content: comment.content,
            post_id: comment.post_id.to_wire(),
            user_id: comment.user_id.to_wire(),
            date: to_iso_string(comment.date),
        }
    }
}
