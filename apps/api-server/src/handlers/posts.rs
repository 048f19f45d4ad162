//! Post handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_core::domain::{NewPost, PostDetail, PostPatch};
use quill_shared::MessageResponse;
use quill_shared::dto::{PostRequest, PostResponse, PostUpdateRequest};

use crate::handlers::validate;
use crate::middleware::auth::Identity;
use crate::middleware::error::ApiResult;
use crate::state::AppState;

fn to_response(detail: PostDetail) -> PostResponse {
    PostResponse {
        title: detail.post.title,
        content: detail.post.content,
        categories: detail.categories,
        tags: detail.tags,
        created_at: detail.post.created_at,
        updated_at: detail.post.updated_at,
    }
}

#[derive(Deserialize)]
pub struct CategoryQuery {
    category: String,
}

#[derive(Deserialize)]
pub struct TagQuery {
    tag: String,
}

/// POST /api/v1/posts/create
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();
    validate::post(&req)?;

    let detail = state
        .posts
        .create(
            &identity.email,
            NewPost {
                title: req.title,
                content: req.content,
                categories: req.categories,
                tags: req.tags,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(to_response(detail)))
}

/// GET /api/v1/posts/{title}
pub async fn get(state: web::Data<AppState>, title: web::Path<String>) -> ApiResult<HttpResponse> {
    let detail = state.posts.get(&title).await?;

    Ok(HttpResponse::Ok().json(to_response(detail)))
}

/// GET /api/v1/posts/all
pub async fn all(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let details = state.posts.list_all().await?;

    let responses: Vec<PostResponse> = details.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(responses))
}

/// GET /api/v1/posts/all-by-category?category=name
pub async fn all_by_category(
    state: web::Data<AppState>,
    query: web::Query<CategoryQuery>,
) -> ApiResult<HttpResponse> {
    let details = state.posts.list_by_category(&query.category).await?;

    let responses: Vec<PostResponse> = details.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(responses))
}

/// GET /api/v1/posts/all-by-tag?tag=name
pub async fn all_by_tag(
    state: web::Data<AppState>,
    query: web::Query<TagQuery>,
) -> ApiResult<HttpResponse> {
    let details = state.posts.list_by_tag(&query.tag).await?;

    let responses: Vec<PostResponse> = details.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(responses))
}

/// PUT /api/v1/posts/update/{title}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    title: web::Path<String>,
    body: web::Json<PostUpdateRequest>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();

    let detail = state
        .posts
        .update(
            &identity.email,
            &title,
            PostPatch {
                title: req.title,
                content: req.content,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(to_response(detail)))
}

/// DELETE /api/v1/posts/{title}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    title: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.posts.delete(&identity.email, &title).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "Post with the title '{}' deleted",
        title
    ))))
}
