use serde::{Deserialize, Serialize};

use crate::ids::DocId;

/// The (post_id, user_id) pair is unique, enforced by a compound index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    #[serde(rename = "_id")]
    pub id: DocId,
    pub post_id: DocId,
    pub user_id: DocId,
}
