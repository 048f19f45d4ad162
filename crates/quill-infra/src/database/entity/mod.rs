//! SeaORM entities mirroring the Postgres schema.

pub mod category;
pub mod comment;
pub mod post;
pub mod post_category;
pub mod post_tag;
pub mod tag;
pub mod user;
