use actix_web::{HttpResponse, delete, get, post, put, web};
use bson::Bson;
use serde::Deserialize;

use crate::AppState;
use crate::dtos::post_dtos::{CreatePostDTO, PostOut, UpdatePostDTO};
use crate::dtos::{
    ApiResponse, clamped_limit, day_end, day_start, parse_iso_datetime, require, require_id,
};
use crate::errors::ApiError;
use crate::ids::{self, DocId};
use crate::models::post::Post;
use crate::repositories::post_repository::PostRepository;

fn posts_to_out(posts: Vec<Post>) -> Vec<PostOut> {
    posts.into_iter().map(PostOut::from).collect()
}

#[post("/posts")]
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostDTO>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let content = require("content", &body.content)?;
    let user_id = require_id("user_id", &body.user_id)?.as_doc_id("user_id")?;
    let category_id = match &body.category_id {
        Some(param) if !param.is_empty_text() => Some(param.as_doc_id("category_id")?),
        _ => None,
    };
    let date = match body.date.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(raw) => parse_iso_datetime(raw)
            .ok_or_else(|| ApiError::InvalidPayload("Invalid date format".into()))?,
        None => bson::DateTime::now(),
    };

    let post = Post {
        id: DocId::new_oid(),
        title: body.title.filter(|t| !t.trim().is_empty()),
        content,
        user_id,
        category_id,
        date,
    };
    PostRepository::insert(&state.db, &post).await?;

    Ok(HttpResponse::Created().json(ApiResponse {
        message: "Post created successfully".into(),
        data: Some(PostOut::from(post)),
    }))
}

#[get("/posts")]
pub async fn list_posts(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let posts = PostRepository::find_all(&state.db).await?;
    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Post list".into(),
        data: Some(posts_to_out(posts)),
    }))
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    limit: Option<String>,
}

#[get("/posts/latest")]
pub async fn latest_posts(
    state: web::Data<AppState>,
    query: web::Query<LimitQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = clamped_limit(query.limit.as_deref(), 5);
    let posts = PostRepository::latest(&state.db, limit).await?;
    Ok(HttpResponse::Ok().json(ApiResponse {
        message: format!("The {} latest posts", limit),
        data: Some(posts_to_out(posts)),
    }))
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    date: Option<String>,
}

#[get("/posts/after")]
pub async fn posts_after(
    state: web::Data<AppState>,
    query: web::Query<DateQuery>,
) -> Result<HttpResponse, ApiError> {
    let raw = query
        .date
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or(ApiError::MissingField("date"))?;
    let instant = day_start(raw)
        .ok_or_else(|| ApiError::InvalidPayload("Invalid date format. Use YYYY-MM-DD".into()))?;

    let posts = PostRepository::after(&state.db, instant).await?;
    Ok(HttpResponse::Ok().json(ApiResponse {
        message: format!("Posts after {}", raw),
        data: Some(posts_to_out(posts)),
    }))
}

#[get("/posts/before")]
pub async fn posts_before(
    state: web::Data<AppState>,
    query: web::Query<DateQuery>,
) -> Result<HttpResponse, ApiError> {
    let raw = query
        .date
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or(ApiError::MissingField("date"))?;
    let instant = day_end(raw)
        .ok_or_else(|| ApiError::InvalidPayload("Invalid date format. Use YYYY-MM-DD".into()))?;

    let posts = PostRepository::before(&state.db, instant).await?;
    Ok(HttpResponse::Ok().json(ApiResponse {
        message: format!("Posts before {}", raw),
        data: Some(posts_to_out(posts)),
    }))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    query: Option<String>,
}

#[get("/posts/search")]
pub async fn search_posts(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let term = query
        .query
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or(ApiError::MissingField("query"))?;

    let posts = PostRepository::search(&state.db, term).await?;
    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Posts found".into(),
        data: Some(posts_to_out(posts)),
    }))
}

#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = ids::resolve_doc_id(&path)?;
    let post = PostRepository::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".into()))?;

    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Post retrieved".into(),
        data: Some(PostOut::from(post)),
    }))
}

#[put("/posts/{id}")]
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostDTO>,
) -> Result<HttpResponse, ApiError> {
    let id = ids::resolve_doc_id(&path)?;
    let body = body.into_inner();
    let content = require("content", &body.content)?;

    let db = &state.db;
    if PostRepository::find_by_id(db, &id).await?.is_none() {
        return Err(ApiError::NotFound("Post not found".into()));
    }

    let mut set = bson::doc! { "content": content.as_str() };
    if let Some(title) = body.title.as_deref().filter(|t| !t.trim().is_empty()) {
        set.insert("title", title);
    }
    if let Some(param) = &body.user_id {
        if !param.is_empty_text() {
            set.insert("user_id", param.as_doc_id("user_id")?);
        }
    }
    // An empty category_id clears the field; an absent one leaves it alone.
    match &body.category_id {
        Some(param) if param.is_empty_text() => {
            set.insert("category_id", Bson::Null);
        }
        Some(param) => {
            set.insert("category_id", param.as_doc_id("category_id")?);
        }
        None => {}
    }
    if let Some(raw) = body.date.as_deref().filter(|s| !s.trim().is_empty()) {
        let date = parse_iso_datetime(raw)
            .ok_or_else(|| ApiError::InvalidPayload("Invalid date format".into()))?;
        set.insert("date", date);
    }
    PostRepository::update(db, &id, set).await?;

    let updated = PostRepository::find_by_id(db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".into()))?;

    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Post updated successfully".into(),
        data: Some(PostOut::from(updated)),
    }))
}

#[put("/posts")]
pub async fn update_post_missing_id() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MissingId)
}

#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = ids::resolve_doc_id(&path)?;
    if PostRepository::delete(&state.db, &id).await? == 0 {
        return Err(ApiError::NotFound("Post not found".into()));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::<()> {
        message: "Post deleted successfully".into(),
        data: None,
    }))
}

#[delete("/posts")]
pub async fn delete_post_missing_id() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MissingId)
}
