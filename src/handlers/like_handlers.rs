use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::AppState;
use crate::dtos::like_dtos::{CreateLikeDTO, LikeOut};
use crate::dtos::{ApiResponse, require_id};
use crate::errors::ApiError;
use crate::ids::{self, DocId};
use crate::models::like::Like;
use crate::repositories::like_repository::LikeRepository;

#[post("/likes")]
pub async fn create_like(
    state: web::Data<AppState>,
    body: web::Json<CreateLikeDTO>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let post_id = require_id("post_id", &body.post_id)?.as_reference("post_id")?;
    let user_id = require_id("user_id", &body.user_id)?.as_reference("user_id")?;

    let db = &state.db;
    if LikeRepository::find_by_pair(db, post_id, user_id).await?.is_some() {
        return Err(ApiError::DuplicateKey("This like already exists".into()));
    }

    let like = Like {
        id: DocId::new_oid(),
        post_id: DocId::Oid(post_id),
        user_id: DocId::Oid(user_id),
    };
    LikeRepository::insert(db, &like).await?;

    Ok(HttpResponse::Created().json(ApiResponse {
        message: "Like created successfully".into(),
        data: Some(LikeOut::from(like)),
    }))
}

#[get("/likes")]
pub async fn list_likes(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let likes = LikeRepository::find_all(&state.db).await?;
    let data: Vec<LikeOut> = likes.into_iter().map(LikeOut::from).collect();
    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Like list".into(),
        data: Some(data),
    }))
}

#[get("/likes/{id}")]
pub async fn get_like(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = DocId::from(ids::resolve_object_id(&path)?);
    let like = LikeRepository::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Like not found".into()))?;

    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Like retrieved".into(),
        data: Some(LikeOut::from(like)),
    }))
}

// Likes are created and removed, never edited.
#[put("/likes")]
pub async fn update_like_not_allowed() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MethodNotAllowed)
}

#[put("/likes/{id}")]
pub async fn update_like_by_id_not_allowed() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MethodNotAllowed)
}

#[delete("/likes/{id}")]
pub async fn delete_like(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = DocId::from(ids::resolve_object_id(&path)?);
    if LikeRepository::delete(&state.db, &id).await? == 0 {
        return Err(ApiError::NotFound("Like not found".into()));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::<()> {
        message: "Like deleted successfully".into(),
        data: None,
    }))
}

#[delete("/likes")]
pub async fn delete_like_missing_id() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MissingId)
}
