use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::AppState;
use crate::dtos::category_dtos::{CategoryOut, CreateCategoryDTO, UpdateCategoryDTO};
use crate::dtos::{ApiResponse, require};
use crate::errors::ApiError;
use crate::ids::{self, DocId};
use crate::models::category::Category;
use crate::repositories::category_repository::CategoryRepository;

#[post("/categories")]
pub async fn create_category(
    state: web::Data<AppState>,
    body: web::Json<CreateCategoryDTO>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let name = require("name", &body.name)?;

    let db = &state.db;
    if CategoryRepository::find_by_name(db, &name).await?.is_some() {
        return Err(ApiError::DuplicateKey(
            "A category with this name already exists".into(),
        ));
    }

    let category = Category {
        id: DocId::new_oid(),
        name,
        description: body.description.filter(|d| !d.trim().is_empty()),
    };
    CategoryRepository::insert(db, &category).await?;

    Ok(HttpResponse::Created().json(ApiResponse {
        message: "Category created successfully".into(),
        data: Some(CategoryOut::from(category)),
    }))
}

#[get("/categories")]
pub async fn list_categories(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let categories = CategoryRepository::find_all(&state.db).await?;
    let data: Vec<CategoryOut> = categories.into_iter().map(CategoryOut::from).collect();
    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Category list".into(),
        data: Some(data),
    }))
}

#[get("/categories/{id}")]
pub async fn get_category(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = ids::resolve_doc_id(&path)?;
    let category = CategoryRepository::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Category not found".into()))?;

    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Category retrieved".into(),
        data: Some(CategoryOut::from(category)),
    }))
}

#[put("/categories/{id}")]
pub async fn update_category(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateCategoryDTO>,
) -> Result<HttpResponse, ApiError> {
    let id = ids::resolve_doc_id(&path)?;
    let body = body.into_inner();
    let name = require("name", &body.name)?;

    let db = &state.db;
    if CategoryRepository::find_by_id(db, &id).await?.is_none() {
        return Err(ApiError::NotFound("Category not found".into()));
    }
    if CategoryRepository::name_taken_by_other(db, &name, &id).await? {
        return Err(ApiError::DuplicateKey(
            "A category with this name already exists".into(),
        ));
    }

    let mut set = bson::doc! { "name": name.as_str() };
    if let Some(description) = &body.description {
        set.insert("description", description.as_str());
    }
    CategoryRepository::update(db, &id, set).await?;

    let updated = CategoryRepository::find_by_id(db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Category not found".into()))?;

    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Category updated successfully".into(),
        data: Some(CategoryOut::from(updated)),
    }))
}

#[put("/categories")]
pub async fn update_category_missing_id() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MissingId)
}

#[delete("/categories/{id}")]
pub async fn delete_category(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = ids::resolve_doc_id(&path)?;
    if CategoryRepository::delete(&state.db, &id).await? == 0 {
        return Err(ApiError::NotFound("Category not found".into()));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::<()> {
        message: "Category deleted successfully".into(),
        data: None,
    }))
}

#[delete("/categories")]
pub async fn delete_category_missing_id() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MissingId)
}
