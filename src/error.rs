/// Error types for blog-service
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Guarded operation invoked with no acting user
    #[error("Authentication required")]
    Unauthenticated,

    /// Authenticated but lacking the required role or ownership
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Slug already in use")]
    DuplicateSlug,

    #[error("Username already in use")]
    DuplicateUsername,

    #[error("Email already in use")]
    DuplicateEmail,

    #[error("Category name already in use")]
    DuplicateCategoryName,

    /// Semantically invalid request (self-follow, credential mismatch)
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Map storage-level constraint violations back onto the domain taxonomy.
/// The constraint names are fixed by migrations/0001_init.sql.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return match db_err.constraint() {
                    Some("posts_slug_key") => AppError::DuplicateSlug,
                    Some("users_username_key") => AppError::DuplicateUsername,
                    Some("users_email_key") => AppError::DuplicateEmail,
                    Some("categories_name_key") => AppError::DuplicateCategoryName,
                    Some(other) => AppError::Conflict(format!("unique violation on {}", other)),
                    None => AppError::Conflict("unique violation".to_string()),
                };
            }
            // A broken reference means the named entity does not exist.
            if db_err.is_foreign_key_violation() {
                return AppError::NotFound(referenced_entity(db_err.constraint()).to_string());
            }
        }
        AppError::Database(err.to_string())
    }
}

/// Resolve which entity a foreign-key constraint points at from its name.
fn referenced_entity(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(c) if c.contains("post_id") => "post",
        Some(c) if c.contains("category_id") => "category",
        Some(c) if c.contains("role_id") => "role",
        Some(c) if c.contains("tag_id") => "tag",
        Some(c)
            if c.contains("user_id")
                || c.contains("author_id")
                || c.contains("follower_id")
                || c.contains("followed_id") =>
        {
            "user"
        }
        _ => "referenced entity",
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    status: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateSlug
            | AppError::DuplicateUsername
            | AppError::DuplicateEmail
            | AppError::DuplicateCategoryName
            | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidOperation(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: self.to_string(),
            status: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fk_constraint_names_resolve_to_entities() {
        assert_eq!(referenced_entity(Some("notifications_post_id_fkey")), "post");
        assert_eq!(referenced_entity(Some("notifications_user_id_fkey")), "user");
        assert_eq!(referenced_entity(Some("posts_author_id_fkey")), "user");
        assert_eq!(
            referenced_entity(Some("posts_category_id_fkey")),
            "category"
        );
        assert_eq!(referenced_entity(Some("user_roles_role_id_fkey")), "role");
        assert_eq!(referenced_entity(Some("post_tags_tag_id_fkey")), "tag");
        assert_eq!(referenced_entity(None), "referenced entity");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("nope".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::DuplicateSlug.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::InvalidOperation("self-follow".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
