mod config;
mod dtos;
mod errors;
mod handlers;
mod ids;
mod models;
mod repositories;
mod schema;

use std::env;

use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, middleware::Logger, web};
use log::{error, info};
use mongodb::Database;

use crate::errors::ApiError;
use crate::handlers::{
    category_handlers, comment_handlers, follow_handlers, like_handlers, post_handlers,
    stats_handlers, user_handlers,
};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    dotenv::dotenv().ok();

    let db = match config::get_database().await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to set up the database handle: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = schema::ensure_schema(&db).await {
        error!("Schema setup failed: {}", e);
        std::process::exit(1);
    }

    let state = web::Data::new(AppState { db });

    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_address = format!("0.0.0.0:{}", port);
    info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                ApiError::InvalidPayload(format!("Invalid JSON payload: {}", err)).into()
            }))
            .service(
                web::scope("/api")
                    // users — verb routes must register before the {id} matcher
                    .service(user_handlers::count_users)
                    .service(user_handlers::most_followed_users)
                    .service(user_handlers::user_pseudos)
                    .service(user_handlers::create_user)
                    .service(user_handlers::list_users)
                    .service(user_handlers::get_user)
                    .service(user_handlers::update_user)
                    .service(user_handlers::update_user_missing_id)
                    .service(user_handlers::delete_user)
                    .service(user_handlers::delete_user_missing_id)
                    // posts
                    .service(post_handlers::latest_posts)
                    .service(post_handlers::posts_after)
                    .service(post_handlers::posts_before)
                    .service(post_handlers::search_posts)
                    .service(post_handlers::create_post)
                    .service(post_handlers::list_posts)
                    .service(post_handlers::get_post)
                    .service(post_handlers::update_post)
                    .service(post_handlers::update_post_missing_id)
                    .service(post_handlers::delete_post)
                    .service(post_handlers::delete_post_missing_id)
                    // comments
                    .service(comment_handlers::create_comment)
                    .service(comment_handlers::list_comments)
                    .service(comment_handlers::get_comment)
                    .service(comment_handlers::update_comment)
                    .service(comment_handlers::update_comment_missing_id)
                    .service(comment_handlers::delete_comment)
                    .service(comment_handlers::delete_comment_missing_id)
                    // likes
                    .service(like_handlers::create_like)
                    .service(like_handlers::list_likes)
                    .service(like_handlers::get_like)
                    .service(like_handlers::update_like_not_allowed)
                    .service(like_handlers::update_like_by_id_not_allowed)
                    .service(like_handlers::delete_like)
                    .service(like_handlers::delete_like_missing_id)
                    // follows — sub-routes before the {id} matcher
                    .service(follow_handlers::list_following)
                    .service(follow_handlers::list_followers)
                    .service(follow_handlers::create_follow)
                    .service(follow_handlers::list_follows)
                    .service(follow_handlers::get_follow)
                    .service(follow_handlers::update_follow_not_allowed)
                    .service(follow_handlers::update_follow_by_id_not_allowed)
                    .service(follow_handlers::delete_follow)
                    .service(follow_handlers::delete_follow_by_pair)
                    // categories
                    .service(category_handlers::create_category)
                    .service(category_handlers::list_categories)
                    .service(category_handlers::get_category)
                    .service(category_handlers::update_category)
                    .service(category_handlers::update_category_missing_id)
                    .service(category_handlers::delete_category)
                    .service(category_handlers::delete_category_missing_id)
                    // stats — read-only aggregations
                    .service(
                        web::scope("/stats")
                            .service(stats_handlers::posts_count)
                            .service(stats_handlers::post_comments_count)
                            .service(stats_handlers::category_likes_average)
                            .default_service(web::route().to(stats_handlers::stats_fallback)),
                    )
                    .default_service(web::route().to(handlers::fallback)),
            )
            .default_service(web::route().to(handlers::fallback))
    })
    .bind(&bind_address)?
    .run()
    .await
}
