use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::AppState;
use crate::dtos::comment_dtos::{CommentOut, CreateCommentDTO, UpdateCommentDTO};
use crate::dtos::{ApiResponse, parse_iso_datetime, require, require_id};
use crate::errors::ApiError;
use crate::ids::{self, DocId};
use crate::models::comment::Comment;
use crate::repositories::comment_repository::CommentRepository;

#[post("/comments")]
pub async fn create_comment(
    state: web::Data<AppState>,
    body: web::Json<CreateCommentDTO>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let content = require("content", &body.content)?;
    let post_id = require_id("post_id", &body.post_id)?.as_reference("post_id")?;
    let user_id = require_id("user_id", &body.user_id)?.as_reference("user_id")?;
    let date = match body.date.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(raw) => parse_iso_datetime(raw)
            .ok_or_else(|| ApiError::InvalidPayload("Invalid date format".into()))?,
        None => bson::DateTime::now(),
    };

    let comment = Comment {
        id: DocId::new_oid(),
        content,
        post_id: DocId::Oid(post_id),
        user_id: DocId::Oid(user_id),
        date,
    };
    CommentRepository::insert(&state.db, &comment).await?;

    Ok(HttpResponse::Created().json(ApiResponse {
        message: "Comment created successfully".into(),
        data: Some(CommentOut::from(comment)),
    }))
}

#[get("/comments")]
pub async fn list_comments(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let comments = CommentRepository::find_all(&state.db).await?;
    let data: Vec<CommentOut> = comments.into_iter().map(CommentOut::from).collect();
    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Comment list".into(),
        data: Some(data),
    }))
}

#[get("/comments/{id}")]
pub async fn get_comment(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = DocId::from(ids::resolve_object_id(&path)?);
    let comment = CommentRepository::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Comment not found".into()))?;

    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Comment retrieved".into(),
        data: Some(CommentOut::from(comment)),
    }))
}

#[put("/comments/{id}")]
pub async fn update_comment(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateCommentDTO>,
) -> Result<HttpResponse, ApiError> {
    let id = DocId::from(ids::resolve_object_id(&path)?);
    let body = body.into_inner();
    let content = require("content", &body.content)?;

    let db = &state.db;
    if CommentRepository::find_by_id(db, &id).await?.is_none() {
        return Err(ApiError::NotFound("Comment not found".into()));
    }

    let mut set = bson::doc! { "content": content.as_str() };
    if let Some(param) = &body.post_id {
        if !param.is_empty_text() {
            set.insert("post_id", param.as_reference("post_id")?);
        }
    }
    if let Some(param) = &body.user_id {
        if !param.is_empty_text() {
            set.insert("user_id", param.as_reference("user_id")?);
        }
    }
    if let Some(raw) = body.date.as_deref().filter(|s| !s.trim().is_empty()) {
        let date = parse_iso_datetime(raw)
            .ok_or_else(|| ApiError::InvalidPayload("Invalid date format".into()))?;
        set.insert("date", date);
    }
    CommentRepository::update(db, &id, set).await?;

    let updated = CommentRepository::find_by_id(db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Comment not found".into()))?;

    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Comment updated successfully".into(),
        data: Some(CommentOut::from(updated)),
    }))
}

#[put("/comments")]
pub async fn update_comment_missing_id() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MissingId)
}

#[delete("/comments/{id}")]
pub async fn delete_comment(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = DocId::from(ids::resolve_object_id(&path)?);
    if CommentRepository::delete(&state.db, &id).await? == 0 {
        return Err(ApiError::NotFound("Comment not found".into()));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::<()> {
        message: "Comment deleted successfully".into(),
        data: None,
    }))
}

#[delete("/comments")]
pub async fn delete_comment_missing_id() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MissingId)
}
