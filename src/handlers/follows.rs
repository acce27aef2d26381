/// Follow/unfollow endpoints
use crate::error::Result;
use crate::handlers::AuthUser;
use crate::services::follow;
use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn follow(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let outcome = follow::follow(&pool, user.0, *path).await?;
    Ok(HttpResponse::Ok().json(json!({ "outcome": outcome })))
}

pub async fn unfollow(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let outcome = follow::unfollow(&pool, user.0, *path).await?;
    Ok(HttpResponse::Ok().json(json!({ "outcome": outcome })))
}
