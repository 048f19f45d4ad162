//! Domain entities - the core business objects.

mod association;
mod category;
mod comment;
mod post;
mod tag;
mod user;

pub use association::{PostCategory, PostTag};
pub use category::Category;
pub use comment::{Comment, CommentDetail};
pub use post::{NewPost, Post, PostDetail, PostPatch};
pub use tag::Tag;
pub use user::{Role, User};
