//! Registration and login handlers.

use actix_web::{HttpResponse, web};

use quill_core::service::Registration;
use quill_shared::dto::{AuthResponse, LoginRequest, RegisterRequest};

use crate::handlers::validate;
use crate::middleware::error::ApiResult;
use crate::state::AppState;

/// POST /api/v1/user/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();
    validate::register(&req)?;

    let token = state
        .accounts
        .register(Registration {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            repeat_password: req.repeat_password,
        })
        .await?;

    Ok(HttpResponse::Created().json(AuthResponse { token }))
}

/// POST /api/v1/user/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();
    validate::login(&req)?;

    let token = state.accounts.login(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(AuthResponse { token }))
}
