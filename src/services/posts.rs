/// Post lifecycle: create, update, delete
///
/// All mutation goes through the single owner-or-Admin policy check; slug
/// identity goes through the allocator. Handlers never touch those rules
/// directly.
use crate::db;
use crate::error::{AppError, Result};
use crate::models::{Post, PostInput, Tag};
use crate::services::{policy, slug};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// A post together with its resolved tag set.
#[derive(Debug, serde::Serialize)]
pub struct PostWithTags {
    #[serde(flatten)]
    pub post: Post,
    pub tags: Vec<Tag>,
}

async fn check_category(pool: &PgPool, category_id: Option<Uuid>) -> Result<()> {
    if let Some(id) = category_id {
        if db::categories::find_by_id(pool, id).await?.is_none() {
            return Err(AppError::NotFound("category".to_string()));
        }
    }
    Ok(())
}

/// Resolve tag names to rows, creating missing ones, then pin the post's
/// tag set to exactly that list.
async fn apply_tags(pool: &PgPool, post_id: Uuid, tag_names: &[String]) -> Result<Vec<Tag>> {
    let mut tags = Vec::with_capacity(tag_names.len());
    for name in tag_names {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            continue;
        }
        tags.push(db::tags::get_or_create(pool, trimmed).await?);
    }

    let tag_ids: Vec<Uuid> = tags.iter().map(|t| t.id).collect();
    db::posts::set_post_tags(pool, post_id, &tag_ids).await?;

    Ok(tags)
}

/// Create a post as the acting user.
pub async fn create_post(
    pool: &PgPool,
    actor: Option<Uuid>,
    input: PostInput,
) -> Result<PostWithTags> {
    let author_id = policy::require_authenticated(actor)?;

    if input.title.trim().is_empty() || input.body.trim().is_empty() {
        return Err(AppError::Validation("title and body are required".to_string()));
    }

    check_category(pool, input.category_id).await?;

    let slug = slug::allocate(pool, &input.title, None).await?;
    let post = db::posts::create_post(
        pool,
        author_id,
        &input.title,
        &slug,
        &input.body,
        input.category_id,
        input.is_published,
    )
    .await?;

    let tags = apply_tags(pool, post.id, &input.tags).await?;

    info!(post_id = %post.id, slug = %post.slug, author = %author_id, "Created post");

    Ok(PostWithTags { post, tags })
}

/// Edit a post. A changed title re-derives the slug from the new title,
/// checking uniqueness against every slug but the post's own.
pub async fn update_post(
    pool: &PgPool,
    actor: Option<Uuid>,
    post_id: Uuid,
    input: PostInput,
) -> Result<PostWithTags> {
    let existing = db::posts::find_by_id(pool, post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("post".to_string()))?;

    policy::authorize_post_mutation(pool, actor, &existing).await?;

    if input.title.trim().is_empty() || input.body.trim().is_empty() {
        return Err(AppError::Validation("title and body are required".to_string()));
    }

    check_category(pool, input.category_id).await?;

    let slug = if input.title == existing.title {
        existing.slug.clone()
    } else {
        slug::allocate(pool, &input.title, Some(post_id)).await?
    };

    let post = db::posts::update_post(
        pool,
        post_id,
        &input.title,
        &slug,
        &input.body,
        input.category_id,
        input.is_published,
    )
    .await?;

    let tags = apply_tags(pool, post.id, &input.tags).await?;

    Ok(PostWithTags { post, tags })
}

/// Delete a post, same authorization rule as editing.
pub async fn delete_post(pool: &PgPool, actor: Option<Uuid>, post_id: Uuid) -> Result<()> {
    let existing = db::posts::find_by_id(pool, post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("post".to_string()))?;

    let actor_id = policy::authorize_post_mutation(pool, actor, &existing).await?;

    db::posts::delete_post(pool, post_id).await?;

    info!(post_id = %post_id, actor = %actor_id, "Deleted post");

    Ok(())
}

/// Fetch a post by slug with its tags.
pub async fn get_by_slug(pool: &PgPool, slug: &str) -> Result<PostWithTags> {
    let post = db::posts::find_by_slug(pool, slug)
        .await?
        .ok_or_else(|| AppError::NotFound("post".to_string()))?;

    let tags = db::posts::tags_for_post(pool, post.id).await?;

    Ok(PostWithTags { post, tags })
}
