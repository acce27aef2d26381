/// Role and user_roles junction operations
///
/// Assignment and revocation are idempotent at the SQL level: assigning a
/// held role hits ON CONFLICT DO NOTHING, revoking an unheld one deletes
/// zero rows. Neither is an error.
use crate::error::Result;
use crate::models::Role;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>> {
    let role = sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(role)
}

pub async fn list_roles(pool: &PgPool) -> Result<Vec<Role>> {
    let roles = sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY name ASC")
        .fetch_all(pool)
        .await?;

    Ok(roles)
}

/// Insert a role if absent. Used by startup seeding.
pub async fn upsert_role(pool: &PgPool, name: &str, description: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO roles (id, name, description)
        VALUES ($1, $2, $3)
        ON CONFLICT (name) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(description)
    .execute(pool)
    .await?;

    Ok(())
}

/// Idempotent role grant; returns true if a new row was inserted.
pub async fn assign_role(pool: &PgPool, user_id: Uuid, role_id: Uuid) -> Result<bool> {
    let inserted = sqlx::query_as::<_, (Uuid,)>(
        r#"
        INSERT INTO user_roles (user_id, role_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, role_id) DO NOTHING
        RETURNING user_id
        "#,
    )
    .bind(user_id)
    .bind(role_id)
    .fetch_optional(pool)
    .await?;

    Ok(inserted.is_some())
}

/// Idempotent role revocation; returns true if a row was removed.
pub async fn revoke_role(pool: &PgPool, user_id: Uuid, role_id: Uuid) -> Result<bool> {
    let affected = sqlx::query("DELETE FROM user_roles WHERE user_id = $1 AND role_id = $2")
        .bind(user_id)
        .bind(role_id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(affected > 0)
}

/// Case-sensitive exact-name membership query.
pub async fn has_role(pool: &PgPool, user_id: Uuid, role_name: &str) -> Result<bool> {
    let row = sqlx::query_as::<_, (bool,)>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM user_roles ur
            JOIN roles r ON r.id = ur.role_id
            WHERE ur.user_id = $1 AND r.name = $2
        )
        "#,
    )
    .bind(user_id)
    .bind(role_name)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

pub async fn roles_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Role>> {
    let roles = sqlx::query_as::<_, Role>(
        r#"
        SELECT r.*
        FROM roles r
        JOIN user_roles ur ON ur.role_id = r.id
        WHERE ur.user_id = $1
        ORDER BY r.name ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(roles)
}

/// Replace a user's role set with exactly the requested names, as a set
/// difference inside one transaction: roles outside the request are revoked,
/// missing ones granted. Names with no matching roles row are skipped.
pub async fn replace_roles(pool: &PgPool, user_id: Uuid, role_names: &[String]) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        DELETE FROM user_roles
        WHERE user_id = $1
          AND role_id NOT IN (SELECT id FROM roles WHERE name = ANY($2))
        "#,
    )
    .bind(user_id)
    .bind(role_names)
    .execute(tx.as_mut())
    .await?;

    sqlx::query(
        r#"
        INSERT INTO user_roles (user_id, role_id)
        SELECT $1, id FROM roles WHERE name = ANY($2)
        ON CONFLICT (user_id, role_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(role_names)
    .execute(tx.as_mut())
    .await?;

    tx.commit().await?;

    Ok(())
}
