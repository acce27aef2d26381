/// Registration, login, and profile composition
use crate::db;
use crate::error::{AppError, Result};
use crate::models::User;
use crate::security::password;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// Profile view: the account plus its social-graph numbers, and whether the
/// viewer (if any, and not the profile owner) follows this user.
#[derive(Debug, Serialize)]
pub struct Profile {
    #[serde(flatten)]
    pub user: User,
    pub follower_count: i64,
    pub following_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_following: Option<bool>,
}

/// Create an account. Username/email shape is validated before the insert;
/// uniqueness is the database's call and surfaces as DuplicateUsername or
/// DuplicateEmail.
pub async fn register(pool: &PgPool, input: RegisterInput) -> Result<User> {
    input
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let password_hash = password::hash_password(&input.password)?;
    let user = db::users::create_user(pool, &input.username, &input.email, &password_hash).await?;

    info!(user_id = %user.id, username = %user.username, "Registered new user");

    Ok(user)
}

/// Verify credentials and return the account.
///
/// An unknown username and a wrong password produce the same error, so the
/// response does not leak which half was wrong.
pub async fn login(pool: &PgPool, username: &str, password_input: &str) -> Result<User> {
    let user = db::users::find_by_username(pool, username).await?;

    let user = match user {
        Some(u) => u,
        None => {
            return Err(AppError::InvalidOperation(
                "Invalid username or password".to_string(),
            ))
        }
    };

    if !password::verify_password(password_input, &user.password_hash)? {
        return Err(AppError::InvalidOperation(
            "Invalid username or password".to_string(),
        ));
    }

    Ok(user)
}

/// Change the acting user's password after verifying the current one.
/// A mismatch on the current password is the same class as a failed login.
pub async fn change_password(
    pool: &PgPool,
    user_id: Uuid,
    current_password: &str,
    new_password: &str,
) -> Result<()> {
    let user = db::users::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user".to_string()))?;

    if !password::verify_password(current_password, &user.password_hash)? {
        return Err(AppError::InvalidOperation(
            "Current password is incorrect".to_string(),
        ));
    }

    let new_hash = password::hash_password(new_password)?;
    db::users::update_password_hash(pool, user_id, &new_hash).await?;

    info!(user_id = %user_id, "Password changed");

    Ok(())
}

/// Compose the profile view for a username, relative to an optional viewer.
pub async fn profile(pool: &PgPool, viewer: Option<Uuid>, username: &str) -> Result<Profile> {
    let user = db::users::find_by_username(pool, username)
        .await?
        .ok_or_else(|| AppError::NotFound("user".to_string()))?;

    let follower_count = db::follows::follower_count(pool, user.id).await?;
    let following_count = db::follows::following_count(pool, user.id).await?;

    let is_following = match viewer {
        Some(viewer_id) if viewer_id != user.id => {
            Some(db::follows::is_following(pool, viewer_id, user.id).await?)
        }
        _ => None,
    };

    Ok(Profile {
        user,
        follower_count,
        following_count,
        is_following,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_input_validation() {
        let bad_email = RegisterInput {
            username: "alice".to_string(),
            email: "not-an-email".to_string(),
            password: "long enough".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let short_name = RegisterInput {
            username: "ab".to_string(),
            email: "a@example.com".to_string(),
            password: "long enough".to_string(),
        };
        assert!(short_name.validate().is_err());

        let ok = RegisterInput {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "long enough".to_string(),
        };
        assert!(ok.validate().is_ok());
    }
}
