//! Tag vocabulary and post-association handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_shared::MessageResponse;
use quill_shared::dto::TagDto;

use crate::handlers::validate;
use crate::middleware::auth::Identity;
use crate::middleware::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchQuery {
    tag: String,
}

/// POST /api/v1/posts/tags/create
pub async fn create(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<TagDto>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();
    validate::name(&req.name)?;

    let tag = state.tags.create(&req.name).await?;

    Ok(HttpResponse::Created().json(TagDto { name: tag.name }))
}

/// POST /api/v1/posts/tags/create-multi
pub async fn create_multi(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<Vec<TagDto>>,
) -> ApiResult<HttpResponse> {
    let names: Vec<String> = body.into_inner().into_iter().map(|dto| dto.name).collect();
    for name in &names {
        validate::name(name)?;
    }

    let tags = state.tags.create_many(&names).await?;

    let dtos: Vec<TagDto> = tags.into_iter().map(|tag| TagDto { name: tag.name }).collect();
    Ok(HttpResponse::Created().json(dtos))
}

/// GET /api/v1/posts/tags/search?tag=name
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<HttpResponse> {
    let message = if state.tags.exists(&query.tag).await? {
        format!("Tag '{}' does exist", query.tag)
    } else {
        format!("Tag '{}' does not exist", query.tag)
    };

    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

/// GET /api/v1/posts/tags/all
pub async fn all(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let tags = state.tags.list_all().await?;

    let dtos: Vec<TagDto> = tags.into_iter().map(|tag| TagDto { name: tag.name }).collect();
    Ok(HttpResponse::Ok().json(dtos))
}

/// PUT /api/v1/posts/tags/update/{name}
pub async fn update(
    state: web::Data<AppState>,
    _identity: Identity,
    name: web::Path<String>,
    body: web::Json<TagDto>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();
    validate::name(&req.name)?;

    state.tags.rename(&name, &req.name).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "Tag '{}' changed/updated to '{}'",
        name, req.name
    ))))
}

/// DELETE /api/v1/posts/tags/delete/{name}
pub async fn delete(
    state: web::Data<AppState>,
    _identity: Identity,
    name: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.tags.delete(&name).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!("Tag '{}' deleted!", name))))
}

/// PUT /api/v1/posts/{title}/tags/add
pub async fn add_to_post(
    state: web::Data<AppState>,
    identity: Identity,
    title: web::Path<String>,
    body: web::Json<TagDto>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();
    validate::name(&req.name)?;

    state
        .tags
        .add_to_post(&identity.email, &title, &req.name)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "{} tag added to the post '{}'",
        req.name, title
    ))))
}

/// PUT /api/v1/posts/{title}/tags/add-multi
pub async fn add_multi_to_post(
    state: web::Data<AppState>,
    identity: Identity,
    title: web::Path<String>,
    body: web::Json<Vec<TagDto>>,
) -> ApiResult<HttpResponse> {
    let names: Vec<String> = body.into_inner().into_iter().map(|dto| dto.name).collect();
    for name in &names {
        validate::name(name)?;
    }

    state
        .tags
        .add_many_to_post(&identity.email, &title, &names)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "All tags added to the post '{}'",
        title
    ))))
}

/// DELETE /api/v1/posts/{title}/tags/delete
pub async fn remove_from_post(
    state: web::Data<AppState>,
    identity: Identity,
    title: web::Path<String>,
    body: web::Json<TagDto>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();
    validate::name(&req.name)?;

    state
        .tags
        .remove_from_post(&identity.email, &title, &req.name)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "{} tag removed from the post '{}'",
        req.name, title
    ))))
}
