/// Home feed endpoint
use crate::error::Result;
use crate::handlers::{AuthUser, Pagination};
use crate::services::feed;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

pub async fn home_feed(
    pool: web::Data<PgPool>,
    user: AuthUser,
    query: web::Query<Pagination>,
) -> Result<HttpResponse> {
    let posts = feed::compose_feed(&pool, user.0, query.limit(), query.offset()).await?;
    Ok(HttpResponse::Ok().json(posts))
}
