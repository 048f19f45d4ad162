//! # Quill Shared
//!
//! Wire types shared between the API server and its clients.
//! Kept free of server-only dependencies so clients can reuse it.

pub mod dto;
pub mod response;

pub use response::{ErrorBody, MessageResponse};
