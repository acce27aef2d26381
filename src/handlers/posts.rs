/// Post endpoints
use crate::db;
use crate::error::{AppError, Result};
use crate::handlers::{AuthUser, Pagination};
use crate::models::PostInput;
use crate::services::posts;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

pub async fn create_post(
    pool: web::Data<PgPool>,
    user: AuthUser,
    req: web::Json<PostInput>,
) -> Result<HttpResponse> {
    let created = posts::create_post(&pool, Some(user.0), req.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

pub async fn get_post(pool: web::Data<PgPool>, path: web::Path<String>) -> Result<HttpResponse> {
    let post = posts::get_by_slug(&pool, &path).await?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn update_post(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
    req: web::Json<PostInput>,
) -> Result<HttpResponse> {
    let updated = posts::update_post(&pool, Some(user.0), *path, req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete_post(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    posts::delete_post(&pool, Some(user.0), *path).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn list_by_author(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    query: web::Query<Pagination>,
) -> Result<HttpResponse> {
    let author = db::users::find_by_username(&pool, &path)
        .await?
        .ok_or_else(|| AppError::NotFound("user".to_string()))?;

    let posts = db::posts::list_by_author(&pool, author.id, query.limit(), query.offset()).await?;
    Ok(HttpResponse::Ok().json(posts))
}
