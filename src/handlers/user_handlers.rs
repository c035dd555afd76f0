use actix_web::{HttpResponse, delete, get, post, put, web};
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use rand::rngs::OsRng;
use serde::Deserialize;

use crate::AppState;
use crate::dtos::stats_dtos::CountOut;
use crate::dtos::user_dtos::{
    CreateUserDTO, PaginationMeta, PseudosPage, UpdateUserDTO, UserOut, is_valid_email, page_count,
};
use crate::dtos::{ApiResponse, clamped_limit, require};
use crate::errors::ApiError;
use crate::ids::{self, DocId};
use crate::models::user::User;
use crate::repositories::follow_repository::FollowRepository;
use crate::repositories::user_repository::UserRepository;

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))
}

#[post("/users")]
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<CreateUserDTO>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let username = require("username", &body.username)?;
    let password = require("password", &body.password)?;
    let email = require("email", &body.email)?;
    if !is_valid_email(&email) {
        return Err(ApiError::InvalidPayload("Invalid email address".into()));
    }

    let db = &state.db;
    if UserRepository::find_by_username(db, &username).await?.is_some() {
        return Err(ApiError::DuplicateKey("Username already taken".into()));
    }

    let user = User {
        id: DocId::new_oid(),
        username,
        email,
        password: hash_password(&password)?,
        bio: body.bio.filter(|b| !b.trim().is_empty()),
        is_active: None,
    };
    UserRepository::insert(db, &user).await?;

    Ok(HttpResponse::Created().json(ApiResponse {
        message: "User created successfully".into(),
        data: Some(UserOut::from(user)),
    }))
}

#[get("/users")]
pub async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let users = UserRepository::find_all(&state.db).await?;
    let data: Vec<UserOut> = users.into_iter().map(UserOut::from).collect();
    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "User list".into(),
        data: Some(data),
    }))
}

#[get("/users/count")]
pub async fn count_users(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let count = UserRepository::count(&state.db).await?;
    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "User count".into(),
        data: Some(CountOut { count }),
    }))
}

#[derive(Debug, Deserialize)]
pub struct MostFollowedQuery {
    limit: Option<String>,
}

#[get("/users/most-followed")]
pub async fn most_followed_users(
    state: web::Data<AppState>,
    query: web::Query<MostFollowedQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = clamped_limit(query.limit.as_deref(), 3);

    let docs = FollowRepository::most_followed(&state.db, limit).await?;
    let data: Vec<serde_json::Value> = docs
        .into_iter()
        .map(|mut doc| {
            doc.remove("password");
            ids::document_to_json(doc)
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Most followed users".into(),
        data: Some(data),
    }))
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
    limit: Option<String>,
}

#[get("/users/pseudos")]
pub async fn user_pseudos(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    // Unparseable values become 0 and fall into the range checks below.
    let page = query
        .page
        .as_deref()
        .map(|s| s.parse::<u64>().unwrap_or(0))
        .unwrap_or(1);
    let limit = query
        .limit
        .as_deref()
        .map(|s| s.parse::<u64>().unwrap_or(0))
        .unwrap_or(3);

    if page < 1 {
        return Err(ApiError::InvalidPayload("The page parameter must be >= 1".into()));
    }
    if !(1..=100).contains(&limit) {
        return Err(ApiError::InvalidPayload(
            "The limit parameter must be between 1 and 100".into(),
        ));
    }

    let (docs, total) = UserRepository::username_page(&state.db, page, limit).await?;
    let data = docs.into_iter().map(ids::document_to_json).collect();

    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "Usernames retrieved".into(),
        data: Some(PseudosPage {
            data,
            pagination: PaginationMeta {
                page,
                limit,
                total,
                pages: page_count(total, limit),
            },
        }),
    }))
}

#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = DocId::from(ids::resolve_object_id(&path)?);
    let user = UserRepository::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "User retrieved".into(),
        data: Some(UserOut::from(user)),
    }))
}

#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateUserDTO>,
) -> Result<HttpResponse, ApiError> {
    let id = DocId::from(ids::resolve_object_id(&path)?);
    let body = body.into_inner();
    let username = require("username", &body.username)?;
    let email = require("email", &body.email)?;
    if !is_valid_email(&email) {
        return Err(ApiError::InvalidPayload("Invalid email address".into()));
    }

    let db = &state.db;
    if UserRepository::find_by_id(db, &id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".into()));
    }
    if UserRepository::username_taken_by_other(db, &username, &id).await? {
        return Err(ApiError::DuplicateKey("Username already taken".into()));
    }

    let mut set = bson::doc! { "username": username.as_str(), "email": email.as_str() };
    if let Some(password) = body.password.as_deref().filter(|p| !p.trim().is_empty()) {
        set.insert("password", hash_password(password)?);
    }
    if let Some(bio) = &body.bio {
        set.insert("bio", bio.as_str());
    }
    UserRepository::update(db, &id, set).await?;

    let updated = UserRepository::find_by_id(db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(HttpResponse::Ok().json(ApiResponse {
        message: "User updated successfully".into(),
        data: Some(UserOut::from(updated)),
    }))
}

#[put("/users")]
pub async fn update_user_missing_id() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MissingId)
}

#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = DocId::from(ids::resolve_object_id(&path)?);
    if UserRepository::delete(&state.db, &id).await? == 0 {
        return Err(ApiError::NotFound("User not found".into()));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::<()> {
        message: "User deleted successfully".into(),
        data: None,
    }))
}

#[delete("/users")]
pub async fn delete_user_missing_id() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MissingId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{PasswordVerifier, password_hash::PasswordHash};

    #[test]
    fn hashed_passwords_verify_and_never_echo_the_input() {
        let hash = hash_password("hunter2").unwrap();
        assert!(!hash.contains("hunter2"));

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(Argon2::default().verify_password(b"hunter2", &parsed).is_ok());
        assert!(Argon2::default().verify_password(b"wrong", &parsed).is_err());
    }
}
