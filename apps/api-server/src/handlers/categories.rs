//! Category vocabulary and post-association handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_shared::MessageResponse;
use quill_shared::dto::CategoryDto;

use crate::handlers::validate;
use crate::middleware::auth::Identity;
use crate::middleware::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchQuery {
    category: String,
}

/// POST /api/v1/posts/categories/create
pub async fn create(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<CategoryDto>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();
    validate::name(&req.name)?;

    let category = state.categories.create(&req.name).await?;

    Ok(HttpResponse::Created().json(CategoryDto {
        name: category.name,
    }))
}

/// POST /api/v1/posts/categories/create-multi
pub async fn create_multi(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<Vec<CategoryDto>>,
) -> ApiResult<HttpResponse> {
    let names: Vec<String> = body.into_inner().into_iter().map(|dto| dto.name).collect();
    for name in &names {
        validate::name(name)?;
    }

    let categories = state.categories.create_many(&names).await?;

    let dtos: Vec<CategoryDto> = categories
        .into_iter()
        .map(|category| CategoryDto {
            name: category.name,
        })
        .collect();
    Ok(HttpResponse::Created().json(dtos))
}

/// GET /api/v1/posts/categories/search?category=name
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<HttpResponse> {
    let message = if state.categories.exists(&query.category).await? {
        format!("Category '{}' does exist", query.category)
    } else {
        format!("Category '{}' does not exist", query.category)
    };

    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

/// GET /api/v1/posts/categories/all
pub async fn all(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let categories = state.categories.list_all().await?;

    let dtos: Vec<CategoryDto> = categories
        .into_iter()
        .map(|category| CategoryDto {
            name: category.name,
        })
        .collect();
    Ok(HttpResponse::Ok().json(dtos))
}

/// PUT /api/v1/posts/categories/update/{name}
pub async fn update(
    state: web::Data<AppState>,
    _identity: Identity,
    name: web::Path<String>,
    body: web::Json<CategoryDto>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();
    validate::name(&req.name)?;

    state.categories.rename(&name, &req.name).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "Category '{}' changed/updated to '{}'",
        name, req.name
    ))))
}

/// DELETE /api/v1/posts/categories/delete/{name}
pub async fn delete(
    state: web::Data<AppState>,
    _identity: Identity,
    name: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.categories.delete(&name).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "Category '{}' deleted!",
        name
    ))))
}

/// PUT /api/v1/posts/{title}/categories/add
pub async fn add_to_post(
    state: web::Data<AppState>,
    identity: Identity,
    title: web::Path<String>,
    body: web::Json<CategoryDto>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();
    validate::name(&req.name)?;

    state
        .categories
        .add_to_post(&identity.email, &title, &req.name)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "{} category added to the post '{}'",
        req.name, title
    ))))
}

/// PUT /api/v1/posts/{title}/categories/add-multi
pub async fn add_multi_to_post(
    state: web::Data<AppState>,
    identity: Identity,
    title: web::Path<String>,
    body: web::Json<Vec<CategoryDto>>,
) -> ApiResult<HttpResponse> {
    let names: Vec<String> = body.into_inner().into_iter().map(|dto| dto.name).collect();
    for name in &names {
        validate::name(name)?;
    }

    state
        .categories
        .add_many_to_post(&identity.email, &title, &names)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "All categories added to the post '{}'",
        title
    ))))
}

/// DELETE /api/v1/posts/{title}/categories/delete
pub async fn remove_from_post(
    state: web::Data<AppState>,
    identity: Identity,
    title: web::Path<String>,
    body: web::Json<CategoryDto>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();
    validate::name(&req.name)?;

    state
        .categories
        .remove_from_post(&identity.email, &title, &req.name)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "{} category removed from the post '{}'",
        req.name, title
    ))))
}
