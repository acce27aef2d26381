/// Tag database operations
use crate::error::Result;
use crate::models::Tag;
use sqlx::PgPool;
use uuid::Uuid;

/// Fetch a tag by name, creating it if absent. The no-op DO UPDATE makes
/// RETURNING yield the row in both cases.
pub async fn get_or_create(pool: &PgPool, name: &str) -> Result<Tag> {
    let tag = sqlx::query_as::<_, Tag>(
        r#"
        INSERT INTO tags (id, name)
        VALUES ($1, $2)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(tag)
}

pub async fn list_tags(pool: &PgPool) -> Result<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>("SELECT * FROM tags ORDER BY name ASC")
        .fetch_all(pool)
        .await?;

    Ok(tags)
}
