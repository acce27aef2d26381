/// Notification database operations
use crate::error::Result;
use crate::models::Notification;
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a notification; always starts unread.
pub async fn create_notification(
    pool: &PgPool,
    user_id: Uuid,
    post_id: Option<Uuid>,
    message: &str,
) -> Result<Notification> {
    let notification = sqlx::query_as::<_, Notification>(
        r#"
        INSERT INTO notifications (id, user_id, post_id, message)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(post_id)
    .bind(message)
    .fetch_one(pool)
    .await?;

    Ok(notification)
}

pub async fn find_by_id(pool: &PgPool, notification_id: Uuid) -> Result<Option<Notification>> {
    let notification =
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(notification_id)
            .fetch_optional(pool)
            .await?;

    Ok(notification)
}

/// Flip a notification to read. Idempotent: marking an already-read
/// notification leaves it read.
pub async fn mark_read(pool: &PgPool, notification_id: Uuid) -> Result<Option<Notification>> {
    let notification = sqlx::query_as::<_, Notification>(
        r#"
        UPDATE notifications
        SET is_read = TRUE
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(notification_id)
    .fetch_optional(pool)
    .await?;

    Ok(notification)
}

/// Notifications for a user, newest first.
pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Notification>> {
    let notifications = sqlx::query_as::<_, Notification>(
        r#"
        SELECT * FROM notifications
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(notifications)
}

pub async fn unread_count(pool: &PgPool, user_id: Uuid) -> Result<i64> {
    let row = sqlx::query_as::<_, (i64,)>(
        "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}
