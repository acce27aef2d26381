/// Category database operations
use crate::error::Result;
use crate::models::Category;
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a category. A name collision surfaces as `DuplicateCategoryName`.
pub async fn create_category(
    pool: &PgPool,
    name: &str,
    description: Option<&str>,
) -> Result<Category> {
    let category = sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (id, name, description)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(description)
    .fetch_one(pool)
    .await?;

    Ok(category)
}

pub async fn find_by_id(pool: &PgPool, category_id: Uuid) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
        .bind(category_id)
        .fetch_optional(pool)
        .await?;

    Ok(category)
}

pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC")
        .fetch_all(pool)
        .await?;

    Ok(categories)
}
