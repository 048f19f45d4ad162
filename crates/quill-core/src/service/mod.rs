//! Core services - the business logic behind the HTTP surface.
//!
//! Services are plain structs over the port traits; every collaborator
//! is handed in at construction.

mod account;
mod associations;
mod category;
mod comment;
mod guard;
mod post;
mod tag;

pub use account::{AccountService, Registration};
pub use associations::AssociationManager;
pub use category::CategoryService;
pub use comment::CommentService;
pub use guard::OwnershipGuard;
pub use post::PostService;
pub use tag::TagService;
