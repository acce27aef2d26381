/// Home-timeline composition
///
/// The feed is defined only for an authenticated caller; the HTTP layer's
/// extractor guarantees that before this is reached. Visibility scope is
/// exactly the caller plus the users they follow — publish state does not
/// widen or narrow this view.
use crate::db;
use crate::error::Result;
use crate::models::Post;
use sqlx::PgPool;
use uuid::Uuid;

pub const DEFAULT_FEED_LIMIT: i64 = 20;

/// Posts by the user and everyone they follow, newest first.
///
/// A fresh call recomputes from current graph and content state; there is
/// no incremental or streaming variant.
pub async fn compose_feed(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>> {
    db::posts::home_feed(pool, user_id, limit, offset).await
}
