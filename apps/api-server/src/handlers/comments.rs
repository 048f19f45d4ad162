//! Comment handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::CommentDetail;
use quill_shared::MessageResponse;
use quill_shared::dto::{CommentRequest, CommentResponse};

use crate::handlers::validate;
use crate::middleware::auth::Identity;
use crate::middleware::error::ApiResult;
use crate::state::AppState;

fn to_response(detail: CommentDetail) -> CommentResponse {
    CommentResponse {
        id: detail.comment.id,
        user_name: detail.author_email,
        content: detail.comment.content,
        created_at: detail.comment.created_at,
        updated_at: detail.comment.updated_at,
    }
}

/// POST /api/v1/posts/{title}/comments/create
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    title: web::Path<String>,
    body: web::Json<CommentRequest>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();
    validate::comment(&req)?;

    let detail = state
        .comments
        .create(&identity.email, &title, req.content)
        .await?;

    Ok(HttpResponse::Created().json(to_response(detail)))
}

/// GET /api/v1/posts/{title}/comments/{id}
pub async fn get(
    state: web::Data<AppState>,
    path: web::Path<(String, Uuid)>,
) -> ApiResult<HttpResponse> {
    let (title, id) = path.into_inner();

    let detail = state.comments.get(&title, id).await?;

    Ok(HttpResponse::Ok().json(to_response(detail)))
}

/// GET /api/v1/posts/{title}/comments/all
pub async fn all(
    state: web::Data<AppState>,
    title: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let details = state.comments.list_for_post(&title).await?;

    let responses: Vec<CommentResponse> = details.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(responses))
}

/// PUT /api/v1/posts/{title}/comments/{id}/update
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(String, Uuid)>,
    body: web::Json<CommentRequest>,
) -> ApiResult<HttpResponse> {
    let (title, id) = path.into_inner();
    let req = body.into_inner();
    validate::comment(&req)?;

    let detail = state
        .comments
        .update(&identity.email, &title, id, req.content)
        .await?;

    Ok(HttpResponse::Ok().json(to_response(detail)))
}

/// DELETE /api/v1/posts/{title}/comments/{id}/delete
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(String, Uuid)>,
) -> ApiResult<HttpResponse> {
    let (title, id) = path.into_inner();

    state.comments.delete(&identity.email, &title, id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Comment deleted!")))
}
