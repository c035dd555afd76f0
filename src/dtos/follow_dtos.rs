use serde::{Deserialize, Serialize};

use crate::ids::{IdParam, IdValue};
use crate::models::follow::Follow;

/// Shared by POST (create) and the body-based DELETE variant.
#[derive(Debug, Deserialize)]
pub struct FollowPairDTO {
    pub user_id: Option<IdParam>,
    pub user_follow_id: Option<IdParam>,
}

#[derive(Debug, Serialize)]
pub struct FollowOut {
    #[serde(rename = "_id")]
    pub id: IdValue,
    pub user_id: IdValue,
    pub user_follow_id: IdValue,
}

impl From<Follow> for FollowOut {
    fn from(follow: Follow) -> Self {
        FollowOut {
            id: follow.id.to_wire(),
            user_id: follow.user_id.to_wire(),
            user_follow_id: follow.user_follow_id.to_wire(),
        }
    }
}
