/// Category and tag endpoints
use crate::db;
use crate::error::Result;
use crate::handlers::AuthUser;
use crate::services::policy;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

/// Role allowed to manage the category taxonomy.
const EDITOR_ROLE: &str = "Editor";

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

pub async fn create_category(
    pool: web::Data<PgPool>,
    user: AuthUser,
    req: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse> {
    policy::require_role(&pool, Some(user.0), EDITOR_ROLE).await?;

    let category =
        db::categories::create_category(&pool, &req.name, req.description.as_deref()).await?;

    Ok(HttpResponse::Created().json(category))
}

pub async fn list_categories(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let categories = db::categories::list_categories(&pool).await?;
    Ok(HttpResponse::Ok().json(categories))
}

pub async fn list_tags(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let tags = db::tags::list_tags(&pool).await?;
    Ok(HttpResponse::Ok().json(tags))
}
