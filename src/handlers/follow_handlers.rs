use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::AppState;
use crate::dtos::follow_dtos::{FollowOut, FollowPairDTO};
use crate::dtos::{ApiResponse, require_id};
use crate::errors::ApiError;
use crate::ids::{self, DocId};
use crate::models::follow::Follow;
use crate::repositories::follow_repository::FollowRepository;

#[post("/follows")]
pub async fn create_follow(
    state: web::Data<AppState>,
    body: web::Json<FollowPairDTO>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let user_id = require_id("user_id", &body.user_id)?.as_reference("user_id")?;
    let user_follow_id =
        require_id("user_follow_id", &body.user_follow_id)?.as_reference("user_follow_id")?;

    // Rejected before any store access, whatever the collection holds.
    if user_id == user_follow_id {
        return Err(ApiError::InvalidPayload("A user cannot follow themselves".into()));
    }

    let db = &state.db;
    if FollowRepository::find_by_pair(db, user_id, user_follow_id).await?.is_some() {
        return Err(ApiError::DuplicateKey(
            "This follow relationship already exists".into(),
        ));
    }

    let follow = Follow {
        id: DocId::new_oid(),
        user_id: DocId::Oid(user_id),
        user_follow_id: DocId::Oid(user_follow_id),
    };
    FollowRepository::insert(db, &follow).await?;

    Ok(HttpResponse::Created().json(ApiResponse {
        message: "Follow created successfully".into(),
        data: Some(FollowOut::from(follow)),
    }))
}

#[get("/follows")]
pub async fn list_follows(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let follows = FollowRepository::find_all(&state.db).await?;
    let data: Vec<FollowOut> = follows.into_iter().map(FollowOut::from).collect();
    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Follow list".into(),
        data: Some(data),
    }))
}

#[get("/follows/following/{user_id}")]
pub async fn list_following(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = ids::resolve_object_id(&path)?;
    let follows = FollowRepository::by_follower(&state.db, user_id).await?;
    let data: Vec<FollowOut> = follows.into_iter().map(FollowOut::from).collect();
    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Followed users".into(),
        data: Some(data),
    }))
}

#[get("/follows/followers/{user_id}")]
pub async fn list_followers(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = ids::resolve_object_id(&path)?;
    let follows = FollowRepository::by_followed(&state.db, user_id).await?;
    let data: Vec<FollowOut> = follows.into_iter().map(FollowOut::from).collect();
    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Follower list".into(),
        data: Some(data),
    }))
}

#[get("/follows/{id}")]
pub async fn get_follow(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = DocId::from(ids::resolve_object_id(&path)?);
    let follow = FollowRepository::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Follow not found".into()))?;

    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Follow retrieved".into(),
        data: Some(FollowOut::from(follow)),
    }))
}

// Follow relationships are created and removed, never edited.
#[put("/follows")]
pub async fn update_follow_not_allowed() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MethodNotAllowed)
}

#[put("/follows/{id}")]
pub async fn update_follow_by_id_not_allowed() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MethodNotAllowed)
}

#[delete("/follows/{id}")]
pub async fn delete_follow(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = DocId::from(ids::resolve_object_id(&path)?);
    if FollowRepository::delete(&state.db, &id).await? == 0 {
        return Err(ApiError::NotFound("Follow not found".into()));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::<()> {
        message: "Follow deleted successfully".into(),
        data: None,
    }))
}

/// DELETE with no id: the relationship is looked up from the body pair.
#[delete("/follows")]
pub async fn delete_follow_by_pair(
    state: web::Data<AppState>,
    body: web::Json<FollowPairDTO>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let user_id = require_id("user_id", &body.user_id)?.as_reference("user_id")?;
    let user_follow_id =
        require_id("user_follow_id", &body.user_follow_id)?.as_reference("user_follow_id")?;

    let db = &state.db;
    if FollowRepository::find_by_pair(db, user_id, user_follow_id).await?.is_none() {
        return Err(ApiError::NotFound(
            "This follow relationship does not exist".into(),
        ));
    }
    if FollowRepository::delete_by_pair(db, user_id, user_follow_id).await? == 0 {
        return Err(ApiError::NotFound("Follow not found".into()));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()> {
        message: "Follow deleted successfully".into(),
        data: None,
    }))
}
