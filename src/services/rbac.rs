/// Role-based access control operations
///
/// Role names referenced by requests that have no row in the roles table
/// are skipped, not fatal: the seed set is small and fixed, and an unknown
/// name in an assignment request is treated as noise.
use crate::db;
use crate::error::{AppError, Result};
use crate::models::{Role, ADMIN_ROLE, SEED_ROLES};
use crate::services::policy;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Upsert the fixed role set at startup.
pub async fn seed_roles(pool: &PgPool) -> Result<()> {
    for name in SEED_ROLES {
        db::roles::upsert_role(pool, name, &format!("{} role", name)).await?;
    }
    info!("Seeded {} roles", SEED_ROLES.len());
    Ok(())
}

/// Grant a role by name. Idempotent; an unknown role name is a no-op.
pub async fn assign(pool: &PgPool, user_id: Uuid, role_name: &str) -> Result<()> {
    if let Some(role) = db::roles::find_by_name(pool, role_name).await? {
        db::roles::assign_role(pool, user_id, role.id).await?;
    }
    Ok(())
}

/// Revoke a role by name. Idempotent; an unknown role name is a no-op.
pub async fn revoke(pool: &PgPool, user_id: Uuid, role_name: &str) -> Result<()> {
    if let Some(role) = db::roles::find_by_name(pool, role_name).await? {
        db::roles::revoke_role(pool, user_id, role.id).await?;
    }
    Ok(())
}

pub async fn has_role(pool: &PgPool, user_id: Uuid, role_name: &str) -> Result<bool> {
    db::roles::has_role(pool, user_id, role_name).await
}

/// Admin-only bulk replacement: the target user's role set becomes exactly
/// the requested names (intersected with the roles table). Applied as a set
/// difference in one transaction, never as a visible clear-then-add.
pub async fn replace_roles(
    pool: &PgPool,
    actor: Option<Uuid>,
    target_user_id: Uuid,
    role_names: &[String],
) -> Result<Vec<Role>> {
    let actor_id = policy::require_role(pool, actor, ADMIN_ROLE).await?;

    if db::users::find_by_id(pool, target_user_id).await?.is_none() {
        return Err(AppError::NotFound("user".to_string()));
    }

    db::roles::replace_roles(pool, target_user_id, role_names).await?;

    info!(
        actor = %actor_id,
        target = %target_user_id,
        roles = ?role_names,
        "Replaced role set"
    );

    db::roles::roles_for_user(pool, target_user_id).await
}
