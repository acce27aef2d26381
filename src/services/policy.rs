/// Authorization policy
///
/// Every guarded operation takes the acting user explicitly; there is no
/// ambient current-user state. Authentication is always checked before
/// authorization, since a role query against an absent identity is
/// meaningless.
use crate::db;
use crate::error::{AppError, Result};
use crate::models::{Post, ADMIN_ROLE};
use sqlx::PgPool;
use uuid::Uuid;

/// Reject anonymous actors. Returns the confirmed user id.
pub fn require_authenticated(actor: Option<Uuid>) -> Result<Uuid> {
    actor.ok_or(AppError::Unauthenticated)
}

/// Reject actors that are anonymous or lack the named role.
///
/// The two failure classes stay distinct: a missing identity is
/// `Unauthenticated`, a present identity without the role is `Forbidden`.
pub async fn require_role(pool: &PgPool, actor: Option<Uuid>, role_name: &str) -> Result<Uuid> {
    let user_id = require_authenticated(actor)?;

    if db::roles::has_role(pool, user_id, role_name).await? {
        Ok(user_id)
    } else {
        Err(AppError::Forbidden(format!(
            "requires the {} role",
            role_name
        )))
    }
}

/// The single ownership-or-role rule governing all content mutation:
/// the author may touch their own post, and so may an Admin.
pub fn can_modify_post(actor_id: Uuid, post_author_id: Uuid, actor_is_admin: bool) -> bool {
    actor_id == post_author_id || actor_is_admin
}

/// Authorize an edit/delete on a post. Returns the confirmed actor id.
pub async fn authorize_post_mutation(
    pool: &PgPool,
    actor: Option<Uuid>,
    post: &Post,
) -> Result<Uuid> {
    let user_id = require_authenticated(actor)?;
    let is_admin = db::roles::has_role(pool, user_id, ADMIN_ROLE).await?;

    if can_modify_post(user_id, post.author_id, is_admin) {
        Ok(user_id)
    } else {
        Err(AppError::Forbidden(
            "only the author or an Admin may modify this post".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_authenticated_rejects_anonymous() {
        assert!(matches!(
            require_authenticated(None),
            Err(AppError::Unauthenticated)
        ));
    }

    #[test]
    fn test_require_authenticated_passes_through_id() {
        let id = Uuid::new_v4();
        assert_eq!(require_authenticated(Some(id)).unwrap(), id);
    }

    #[test]
    fn test_author_can_modify_own_post() {
        let author = Uuid::new_v4();
        assert!(can_modify_post(author, author, false));
    }

    #[test]
    fn test_admin_can_modify_any_post() {
        assert!(can_modify_post(Uuid::new_v4(), Uuid::new_v4(), true));
    }

    #[test]
    fn test_stranger_cannot_modify_post() {
        assert!(!can_modify_post(Uuid::new_v4(), Uuid::new_v4(), false));
    }
}
