use serde::{Deserialize, Serialize};

use crate::ids::IdValue;
use crate::models::category::Category;

#[derive(Debug, Deserialize)]
pub struct CreateCategoryDTO {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryDTO {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryOut {
    #[serde(rename = "_id")]
    pub id: IdValue,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Category> for CategoryOut {
    fn from(category: Category) -> Self {
        CategoryOut {
            id: category.id.to_wire(),
            name: category.name,
            description: category.description,
        }
    }
}
