use serde::{Deserialize, Serialize};

use crate::ids::{IdParam, IdValue};
use crate::models::like::Like;

#[derive(Debug, Deserialize)]
pub struct CreateLikeDTO {
    pub post_id: Option<IdParam>,
    pub user_id: Option<IdParam>,
}

#[derive(Debug, Serialize)]
pub struct LikeOut {
    #[serde(rename = "_id")]
    pub id: IdValue,
    pub post_id: IdValue,
    pub user_id: IdValue,
}

impl From<Like> for LikeOut {
    fn from(like: Like) -> Self {
        LikeOut {
            id: like.id.to_wire(),
            post_id: like.post_id.to_wire(),
            user_id: like.user_id.to_wire(),
        }
    }
}
