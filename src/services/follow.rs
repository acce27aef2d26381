/// Follow/unfollow operations on the social graph
///
/// Both operations are idempotent at the edge-set level; the no-op cases
/// come back as distinct outcomes rather than errors so callers can phrase
/// an "already following" response without treating it as a failure.
use crate::db;
use crate::error::{AppError, Result};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowOutcome {
    Followed,
    AlreadyFollowing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnfollowOutcome {
    Unfollowed,
    NotFollowing,
}

/// Create a follow edge. Self-follow is `InvalidOperation`; a missing
/// followed user is `NotFound`.
pub async fn follow(pool: &PgPool, follower_id: Uuid, followed_id: Uuid) -> Result<FollowOutcome> {
    if follower_id == followed_id {
        return Err(AppError::InvalidOperation(
            "cannot follow yourself".to_string(),
        ));
    }

    if db::users::find_by_id(pool, followed_id).await?.is_none() {
        return Err(AppError::NotFound("user".to_string()));
    }

    let inserted = db::follows::create_follow(pool, follower_id, followed_id).await?;

    Ok(if inserted {
        FollowOutcome::Followed
    } else {
        FollowOutcome::AlreadyFollowing
    })
}

/// Remove a follow edge. Removing a non-existent edge is `NotFollowing`;
/// that covers the self case too, since a self-edge can never exist.
pub async fn unfollow(
    pool: &PgPool,
    follower_id: Uuid,
    followed_id: Uuid,
) -> Result<UnfollowOutcome> {
    let removed = db::follows::delete_follow(pool, follower_id, followed_id).await?;

    Ok(if removed {
        UnfollowOutcome::Unfollowed
    } else {
        UnfollowOutcome::NotFollowing
    })
}
