/// Post and post_tags database operations
///
/// Slug uniqueness is a hard constraint (posts_slug_key); a conflicting
/// write comes back as `DuplicateSlug` via the error mapping rather than
/// being retried here.
use crate::error::Result;
use crate::models::{Post, Tag};
use sqlx::PgPool;
use uuid::Uuid;

pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    title: &str,
    slug: &str,
    body: &str,
    category_id: Option<Uuid>,
    is_published: bool,
) -> Result<Post> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (id, title, slug, body, author_id, category_id, is_published, published_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, CASE WHEN $7 THEN NOW() END)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(title)
    .bind(slug)
    .bind(body)
    .bind(author_id)
    .bind(category_id)
    .bind(is_published)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

pub async fn find_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>> {
    let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
        .bind(post_id)
        .fetch_optional(pool)
        .await?;

    Ok(post)
}

pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Post>> {
    let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await?;

    Ok(post)
}

/// Update a post in place. `published_at` is stamped the first time the
/// published flag goes true and kept thereafter.
pub async fn update_post(
    pool: &PgPool,
    post_id: Uuid,
    title: &str,
    slug: &str,
    body: &str,
    category_id: Option<Uuid>,
    is_published: bool,
) -> Result<Post> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET title = $2,
            slug = $3,
            body = $4,
            category_id = $5,
            is_published = $6,
            published_at = CASE
                WHEN $6 AND published_at IS NULL THEN NOW()
                ELSE published_at
            END,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(post_id)
    .bind(title)
    .bind(slug)
    .bind(body)
    .bind(category_id)
    .bind(is_published)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Delete a post and its tag links; returns true if a row was removed.
pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<bool> {
    let affected = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(affected > 0)
}

/// True if any post other than `exclude_post_id` already holds this slug.
pub async fn slug_exists(
    pool: &PgPool,
    slug: &str,
    exclude_post_id: Option<Uuid>,
) -> Result<bool> {
    let row = sqlx::query_as::<_, (bool,)>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM posts
            WHERE slug = $1 AND ($2::uuid IS NULL OR id != $2)
        )
        "#,
    )
    .bind(slug)
    .bind(exclude_post_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

/// Posts by one author, newest first.
pub async fn list_by_author(
    pool: &PgPool,
    author_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT * FROM posts
        WHERE author_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(author_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Home timeline: posts whose author is the user or someone they follow,
/// newest first. The id set in the WHERE clause is the entire visibility
/// scope of this view.
pub async fn home_feed(pool: &PgPool, user_id: Uuid, limit: i64, offset: i64) -> Result<Vec<Post>> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT * FROM posts
        WHERE author_id = $1
           OR author_id IN (SELECT followed_id FROM followers WHERE follower_id = $1)
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Replace the tag set of a post. Runs in one transaction so readers never
/// observe a half-replaced set.
pub async fn set_post_tags(pool: &PgPool, post_id: Uuid, tag_ids: &[Uuid]) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM post_tags WHERE post_id = $1 AND tag_id != ALL($2)")
        .bind(post_id)
        .bind(tag_ids)
        .execute(tx.as_mut())
        .await?;

    sqlx::query(
        r#"
        INSERT INTO post_tags (post_id, tag_id)
        SELECT $1, unnest($2::uuid[])
        ON CONFLICT (post_id, tag_id) DO NOTHING
        "#,
    )
    .bind(post_id)
    .bind(tag_ids)
    .execute(tx.as_mut())
    .await?;

    tx.commit().await?;

    Ok(())
}

pub async fn tags_for_post(pool: &PgPool, post_id: Uuid) -> Result<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.*
        FROM tags t
        JOIN post_tags pt ON pt.tag_id = t.id
        WHERE pt.post_id = $1
        ORDER BY t.name ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}
