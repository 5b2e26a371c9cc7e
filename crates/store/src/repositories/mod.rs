//! Repository layer.
//!
//! Each repository owns its collection and exposes async CRUD methods.
//! Lookups return `Option`; the HTTP layer turns `None` into a 404.

pub mod item_repo;
pub mod user_repo;

pub use item_repo::ItemRepo;
pub use user_repo::UserRepo;
