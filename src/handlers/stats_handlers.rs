use actix_web::{HttpRequest, HttpResponse, get, http::Method, web};

use crate::AppState;
use crate::dtos::ApiResponse;
use crate::dtos::stats_dtos::{AverageOut, CountOut};
use crate::errors::ApiError;
use crate::ids;
use crate::repositories::comment_repository::CommentRepository;
use crate::repositories::like_repository::LikeRepository;
use crate::repositories::post_repository::PostRepository;

#[get("/posts/count")]
pub async fn posts_count(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let count = PostRepository::count(&state.db).await?;
    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Post count".into(),
        data: Some(CountOut { count }),
    }))
}

#[get("/posts/{id}/comments/count")]
pub async fn post_comments_count(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let post_id = ids::resolve_doc_id(&path)?;
    let count = CommentRepository::count_by_post(&state.db, &post_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Comment count".into(),
        data: Some(CountOut { count }),
    }))
}

#[get("/categories/{id}/likes/average")]
pub async fn category_likes_average(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let category_id = ids::resolve_doc_id(&path)?;

    let db = &state.db;
    let posts = PostRepository::find_by_category(db, &category_id).await?;
    if posts.is_empty() {
        return Ok(HttpResponse::Ok().json(ApiResponse {
            message: "No posts in this category".into(),
            data: Some(AverageOut { average: 0.0 }),
        }));
    }

    let mut total_likes = 0u64;
    for post in &posts {
        total_likes += LikeRepository::count_by_post(db, &post.id).await?;
    }
    let average = total_likes as f64 / posts.len() as f64;

    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Average likes per post".into(),
        data: Some(AverageOut { average }),
    }))
}

/// Stats endpoints are read-only: unknown paths are 404s, anything other
/// than GET is a 405.
pub async fn stats_fallback(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    match *req.method() {
        Method::GET => Err(ApiError::RouteNotFound),
        Method::OPTIONS => Ok(HttpResponse::Ok().finish()),
        _ => Err(ApiError::MethodNotAllowed),
    }
}
