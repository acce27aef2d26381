/// Follower-edge database operations
///
/// The (follower_id, followed_id) pair is the primary key, so duplicate
/// edges are impossible and both writes are idempotent.
use crate::error::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// Idempotent create follow; returns true if a new edge was inserted.
pub async fn create_follow(pool: &PgPool, follower_id: Uuid, followed_id: Uuid) -> Result<bool> {
    let inserted = sqlx::query_as::<_, (Uuid,)>(
        r#"
        INSERT INTO followers (follower_id, followed_id)
        VALUES ($1, $2)
        ON CONFLICT (follower_id, followed_id) DO NOTHING
        RETURNING follower_id
        "#,
    )
    .bind(follower_id)
    .bind(followed_id)
    .fetch_optional(pool)
    .await?;

    Ok(inserted.is_some())
}

/// Idempotent delete; returns true if an edge was removed.
pub async fn delete_follow(pool: &PgPool, follower_id: Uuid, followed_id: Uuid) -> Result<bool> {
    let affected = sqlx::query(
        "DELETE FROM followers WHERE follower_id = $1 AND followed_id = $2",
    )
    .bind(follower_id)
    .bind(followed_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(affected > 0)
}

pub async fn is_following(pool: &PgPool, follower_id: Uuid, followed_id: Uuid) -> Result<bool> {
    let row = sqlx::query_as::<_, (bool,)>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM followers WHERE follower_id = $1 AND followed_id = $2
        )
        "#,
    )
    .bind(follower_id)
    .bind(followed_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

/// Size of the incoming-edge set.
pub async fn follower_count(pool: &PgPool, user_id: Uuid) -> Result<i64> {
    let row = sqlx::query_as::<_, (i64,)>(
        "SELECT COUNT(*) FROM followers WHERE followed_id = $1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

/// Size of the outgoing-edge set.
pub async fn following_count(pool: &PgPool, user_id: Uuid) -> Result<i64> {
    let row = sqlx::query_as::<_, (i64,)>(
        "SELECT COUNT(*) FROM followers WHERE follower_id = $1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}
