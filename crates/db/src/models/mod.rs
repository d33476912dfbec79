//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row and the `Deserialize` DTOs used to write it.

pub mod bookmark;
pub mod user;
