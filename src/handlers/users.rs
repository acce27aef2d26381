/// User profile and role administration endpoints
use crate::db;
use crate::error::Result;
use crate::handlers::{AuthUser, MaybeAuthUser, Pagination};
use crate::models::ADMIN_ROLE;
use crate::services::{accounts, policy, rbac};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn get_profile(
    pool: web::Data<PgPool>,
    viewer: MaybeAuthUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let profile = accounts::profile(&pool, viewer.0, &path).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[derive(Debug, Deserialize)]
pub struct UpdateBioRequest {
    pub bio: Option<String>,
}

pub async fn update_bio(
    pool: web::Data<PgPool>,
    user: AuthUser,
    req: web::Json<UpdateBioRequest>,
) -> Result<HttpResponse> {
    let updated = db::users::update_bio(&pool, user.0, req.bio.as_deref()).await?;
    match updated {
        Some(u) => Ok(HttpResponse::Ok().json(u)),
        None => Err(crate::error::AppError::NotFound("user".to_string())),
    }
}

/// Admin-only listing backing the role-assignment view.
pub async fn list_users(
    pool: web::Data<PgPool>,
    user: AuthUser,
    query: web::Query<Pagination>,
) -> Result<HttpResponse> {
    policy::require_role(&pool, Some(user.0), ADMIN_ROLE).await?;
    let users = db::users::list_users(&pool, query.limit(), query.offset()).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

pub async fn change_password(
    pool: web::Data<PgPool>,
    user: AuthUser,
    req: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse> {
    accounts::change_password(&pool, user.0, &req.current_password, &req.new_password).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Admin-only listing of the role catalog.
pub async fn list_roles(pool: web::Data<PgPool>, user: AuthUser) -> Result<HttpResponse> {
    policy::require_role(&pool, Some(user.0), ADMIN_ROLE).await?;
    let roles = db::roles::list_roles(&pool).await?;
    Ok(HttpResponse::Ok().json(roles))
}

#[derive(Debug, Deserialize)]
pub struct ReplaceRolesRequest {
    pub roles: Vec<String>,
}

/// Admin-only bulk role replacement for a target user.
pub async fn replace_roles(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
    req: web::Json<ReplaceRolesRequest>,
) -> Result<HttpResponse> {
    let roles = rbac::replace_roles(&pool, Some(user.0), *path, &req.roles).await?;
    Ok(HttpResponse::Ok().json(roles))
}
