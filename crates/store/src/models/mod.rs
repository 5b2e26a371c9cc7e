//! Entity structs and DTOs for the in-memory stores.

pub mod item;
pub mod user;
