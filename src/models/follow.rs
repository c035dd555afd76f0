use serde::{Deserialize, Serialize};

use crate::ids::DocId;

/// `user_id` follows `user_follow_id`. The pair is unique and a user can
/// never follow themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Follow {
    #[serde(rename = "_id")]
    pub id: DocId,
    pub user_id: DocId,
    pub user_follow_id: DocId,
}
