pub mod category_handlers;
pub mod comment_handlers;
pub mod follow_handlers;
pub mod like_handlers;
pub mod post_handlers;
pub mod stats_handlers;
pub mod user_handlers;

use actix_web::{HttpRequest, HttpResponse, http::Method};

use crate::errors::ApiError;

/// Fallback for every path no entity router claims. OPTIONS requests that
/// the CORS middleware did not already answer still short-circuit with 200.
pub async fn fallback(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    if req.method() == Method::OPTIONS {
        return Ok(HttpResponse::Ok().finish());
    }
    Err(ApiError::RouteNotFound)
}
