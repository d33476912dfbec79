//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod bookmark_repo;
pub mod user_repo;

pub use bookmark_repo::{BookmarkInsertError, BookmarkRepo};
pub use user_repo::UserRepo;
