/// Registration and login endpoints
use crate::config::Config;
use crate::error::Result;
use crate::security::token;
use crate::services::accounts::{self, RegisterInput};
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user_id: Uuid,
    pub username: String,
}

pub async fn register(
    pool: web::Data<PgPool>,
    req: web::Json<RegisterInput>,
) -> Result<HttpResponse> {
    let user = accounts::register(&pool, req.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

pub async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let user = accounts::login(&pool, &req.username, &req.password).await?;
    let access_token = token::issue_token(
        user.id,
        &config.auth.jwt_secret,
        config.auth.token_ttl_hours,
    )?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token,
        token_type: "Bearer",
        user_id: user.id,
        username: user.username,
    }))
}
