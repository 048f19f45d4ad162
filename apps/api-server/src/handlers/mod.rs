//! HTTP handlers and route configuration.

mod categories;
mod comments;
mod health;
mod posts;
mod tags;
mod users;
mod validate;

use actix_web::web;

/// Configure all application routes.
///
/// Vocabulary routes with literal segments are registered before the
/// `/{title}` routes, otherwise the path parameter would capture them.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Account routes
            .service(
                web::scope("/user")
                    .route("/register", web::post().to(users::register))
                    .route("/login", web::post().to(users::login)),
            )
            .service(
                web::scope("/posts")
                    // Category vocabulary
                    .route("/categories/create", web::post().to(categories::create))
                    .route(
                        "/categories/create-multi",
                        web::post().to(categories::create_multi),
                    )
                    .route("/categories/search", web::get().to(categories::search))
                    .route("/categories/all", web::get().to(categories::all))
                    .route("/categories/update/{name}", web::put().to(categories::update))
                    .route(
                        "/categories/delete/{name}",
                        web::delete().to(categories::delete),
                    )
                    // Tag vocabulary
                    .route("/tags/create", web::post().to(tags::create))
                    .route("/tags/create-multi", web::post().to(tags::create_multi))
                    .route("/tags/search", web::get().to(tags::search))
                    .route("/tags/all", web::get().to(tags::all))
                    .route("/tags/update/{name}", web::put().to(tags::update))
                    .route("/tags/delete/{name}", web::delete().to(tags::delete))
                    // Posts
                    .route("/create", web::post().to(posts::create))
                    .route("/all", web::get().to(posts::all))
                    .route("/all-by-category", web::get().to(posts::all_by_category))
                    .route("/all-by-tag", web::get().to(posts::all_by_tag))
                    .route("/update/{title}", web::put().to(posts::update))
                    // Associations on a post
                    .route(
                        "/{title}/categories/add",
                        web::put().to(categories::add_to_post),
                    )
                    .route(
                        "/{title}/categories/add-multi",
                        web::put().to(categories::add_multi_to_post),
                    )
                    .route(
                        "/{title}/categories/delete",
                        web::delete().to(categories::remove_from_post),
                    )
                    .route("/{title}/tags/add", web::put().to(tags::add_to_post))
                    .route(
                        "/{title}/tags/add-multi",
                        web::put().to(tags::add_multi_to_post),
                    )
                    .route(
                        "/{title}/tags/delete",
                        web::delete().to(tags::remove_from_post),
                    )
                    // Comments on a post
                    .route("/{title}/comments/create", web::post().to(comments::create))
                    .route("/{title}/comments/all", web::get().to(comments::all))
                    .route(
                        "/{title}/comments/{id}/update",
                        web::put().to(comments::update),
                    )
                    .route(
                        "/{title}/comments/{id}/delete",
                        web::delete().to(comments::delete),
                    )
                    .route("/{title}/comments/{id}", web::get().to(comments::get))
                    // The bare title routes go last
                    .route("/{title}", web::get().to(posts::get))
                    .route("/{title}", web::delete().to(posts::delete)),
            ),
    );
}
