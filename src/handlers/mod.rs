/// HTTP layer: route registration and the acting-user extractors
///
/// The acting user enters through `AuthUser` / `MaybeAuthUser` and is passed
/// down to services as an explicit argument. A missing or invalid Bearer
/// token on a guarded route is rejected as `Unauthenticated` before any
/// handler logic runs.
pub mod auth;
pub mod feed;
pub mod follows;
pub mod notifications;
pub mod posts;
pub mod taxonomy;
pub mod users;

use crate::config::Config;
use crate::error::AppError;
use crate::security::token;
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

/// Acting user for guarded routes; extraction fails with 401 when the
/// Bearer token is missing or invalid.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

/// Optional acting user for routes that render differently for viewers
/// (e.g. profile `is_following`) but do not require authentication.
#[derive(Debug, Clone, Copy)]
pub struct MaybeAuthUser(pub Option<Uuid>);

fn user_from_request(req: &HttpRequest) -> Result<Uuid, AppError> {
    let config = req
        .app_data::<web::Data<Config>>()
        .ok_or_else(|| AppError::Internal("configuration not attached".to_string()))?;

    let header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthenticated)?;

    let bearer = header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthenticated)?;

    token::decode_token(bearer, &config.auth.jwt_secret)
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(user_from_request(req).map(AuthUser))
    }
}

impl FromRequest for MaybeAuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(MaybeAuthUser(user_from_request(req).ok())))
    }
}

/// Register all routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/auth/register", web::post().to(auth::register))
            .route("/auth/login", web::post().to(auth::login))
            .route("/users", web::get().to(users::list_users))
            .route("/users/{username}", web::get().to(users::get_profile))
            .route("/users/{user_id}/roles", web::put().to(users::replace_roles))
            .route("/users/{user_id}/follow", web::post().to(follows::follow))
            .route("/users/{user_id}/follow", web::delete().to(follows::unfollow))
            .route("/me/bio", web::put().to(users::update_bio))
            .route("/me/password", web::put().to(users::change_password))
            .route("/roles", web::get().to(users::list_roles))
            .route("/posts", web::post().to(posts::create_post))
            .route("/posts/{slug}", web::get().to(posts::get_post))
            .route("/posts/{post_id}", web::put().to(posts::update_post))
            .route("/posts/{post_id}", web::delete().to(posts::delete_post))
            .route("/authors/{username}/posts", web::get().to(posts::list_by_author))
            .route("/feed", web::get().to(feed::home_feed))
            .route("/categories", web::post().to(taxonomy::create_category))
            .route("/categories", web::get().to(taxonomy::list_categories))
            .route("/tags", web::get().to(taxonomy::list_tags))
            .route("/notifications", web::post().to(notifications::create))
            .route("/notifications", web::get().to(notifications::list))
            .route(
                "/notifications/{notification_id}/read",
                web::post().to(notifications::mark_read),
            ),
    );
}

/// Shared pagination query parameters.
///
/// Raw values are clamped through the accessors so a hostile `?limit=-1`
/// never reaches the database as a negative LIMIT.
#[derive(Debug, serde::Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    limit: i64,
    #[serde(default)]
    offset: i64,
}

impl Pagination {
    pub const MAX_LIMIT: i64 = 100;

    pub fn limit(&self) -> i64 {
        self.limit.clamp(0, Self::MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.max(0)
    }
}

fn default_limit() -> i64 {
    crate::services::feed::DEFAULT_FEED_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_pagination_is_clamped_to_zero() {
        let p = Pagination {
            limit: -1,
            offset: -50,
        };
        assert_eq!(p.limit(), 0);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_oversized_limit_is_capped() {
        let p = Pagination {
            limit: 10_000,
            offset: 5,
        };
        assert_eq!(p.limit(), Pagination::MAX_LIMIT);
        assert_eq!(p.offset(), 5);
    }

    #[test]
    fn test_in_range_values_pass_through() {
        let p = Pagination {
            limit: 20,
            offset: 40,
        };
        assert_eq!(p.limit(), 20);
        assert_eq!(p.offset(), 40);
    }
}
