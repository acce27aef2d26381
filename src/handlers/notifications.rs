/// Notification endpoints
///
/// Creation is an external surface (nothing in this service triggers
/// notifications on its own), gated to Admin. Recipients read their own
/// list and flip read state.
use crate::db;
use crate::error::{AppError, Result};
use crate::handlers::{AuthUser, Pagination};
use crate::models::ADMIN_ROLE;
use crate::services::policy;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateNotificationRequest {
    pub user_id: Uuid,
    pub post_id: Option<Uuid>,
    pub message: String,
}

pub async fn create(
    pool: web::Data<PgPool>,
    user: AuthUser,
    req: web::Json<CreateNotificationRequest>,
) -> Result<HttpResponse> {
    policy::require_role(&pool, Some(user.0), ADMIN_ROLE).await?;

    if db::users::find_by_id(&pool, req.user_id).await?.is_none() {
        return Err(AppError::NotFound("user".to_string()));
    }

    if let Some(post_id) = req.post_id {
        if db::posts::find_by_id(&pool, post_id).await?.is_none() {
            return Err(AppError::NotFound("post".to_string()));
        }
    }

    let notification =
        db::notifications::create_notification(&pool, req.user_id, req.post_id, &req.message)
            .await?;

    Ok(HttpResponse::Created().json(notification))
}

pub async fn list(
    pool: web::Data<PgPool>,
    user: AuthUser,
    query: web::Query<Pagination>,
) -> Result<HttpResponse> {
    let notifications =
        db::notifications::list_for_user(&pool, user.0, query.limit(), query.offset()).await?;
    let unread = db::notifications::unread_count(&pool, user.0).await?;

    Ok(HttpResponse::Ok().json(json!({
        "notifications": notifications,
        "unread_count": unread,
    })))
}

/// Mark one of the caller's notifications read. Idempotent.
pub async fn mark_read(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let notification = db::notifications::find_by_id(&pool, *path)
        .await?
        .ok_or_else(|| AppError::NotFound("notification".to_string()))?;

    if notification.user_id != user.0 {
        return Err(AppError::Forbidden(
            "not the recipient of this notification".to_string(),
        ));
    }

    let updated = db::notifications::mark_read(&pool, *path)
        .await?
        .ok_or_else(|| AppError::NotFound("notification".to_string()))?;

    Ok(HttpResponse::Ok().json(updated))
}
